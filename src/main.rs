use aismm::cli::{Cli, Commands};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler; the default one is fine if this fails
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }));

    let cli = Cli::parse();
    let global = cli.global;
    aismm::cli::init_logging(&global);

    let result = match cli.command {
        Commands::Validate(args) => aismm::cli::commands::validate::run(args, &global),
        Commands::Sync(args) => aismm::cli::commands::sync::run(args, &global),
        Commands::Completions(args) => aismm::cli::commands::completions::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{:?}", report);
            ExitCode::from(aismm::cli::exit_code_for(&report))
        }
    }
}
