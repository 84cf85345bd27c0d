use lfl::{run, EXIT_IO_FAILURE};

fn init_logger() -> anyhow::Result<()> {
    // Stdout carries the result, so stay quiet unless asked.
    if std::env::var_os("RUST_LOG").is_some() {
        alto_logger::init_alt_term_logger()?;
    }
    Ok(())
}

fn main() {
    if let Err(err) = init_logger() {
        eprintln!("error: {:#}", err);
        std::process::exit(EXIT_IO_FAILURE);
    }

    let code = run(
        std::env::args_os().skip(1),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    std::process::exit(code);
}
