mod shell;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use ascii_mosaic::Session;
use clap::Parser;
use shell::Shell;

/// Interactive image-to-ASCII-art converter
#[derive(Parser)]
#[command(name = "ascii-mosaic", version, about)]
struct Args {
    /// Image to convert
    image: PathBuf,

    /// File the `output html` sink writes to
    #[arg(long, default_value = "out.html")]
    html_out: PathBuf,
}

fn main() -> ExitCode {
    // Configure logging
    env_logger::init();

    let args = Args::parse();
    let session = match Session::open(&args.image) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut shell = Shell::new(session, args.html_out);
    let stdin = io::stdin();
    let stdout = io::stdout();
    shell.run(&mut stdin.lock(), &mut stdout.lock());
    ExitCode::SUCCESS
}
