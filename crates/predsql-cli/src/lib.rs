mod cli;
mod config;
mod where_cmd;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Where(args) => where_cmd::run(args),
    }
}
