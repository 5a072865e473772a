use predsql::Placeholder;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Where,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Where(WhereArgs),
}

#[derive(Debug, Clone)]
pub struct WhereArgs {
    pub config: PathBuf,
    /// `--config` given explicitly: a missing file is then an error.
    pub config_explicit: bool,
    pub placeholder: Option<Placeholder>,
    pub json: bool,
    /// `None` or `-` reads stdin.
    pub input: Option<PathBuf>,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" | "help" => match it.next().map(|s| s.as_str()) {
            None => Ok(Command::Help(HelpTopic::Root)),
            Some("where") => Ok(Command::Help(HelpTopic::Where)),
            Some(other) => anyhow::bail!("unknown help topic: {other}"),
        },
        "where" => parse_where(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_where<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from("predsql.toml");
    let mut config_explicit = false;
    let mut placeholder: Option<Placeholder> = None;
    let mut json = false;
    let mut input: Option<PathBuf> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Where)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
                config_explicit = true;
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
                config_explicit = true;
            }
            "--placeholder" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--placeholder requires a value");
                };
                placeholder = Some(parse_placeholder(v)?);
            }
            _ if token.starts_with("--placeholder=") => {
                placeholder = Some(parse_placeholder(
                    token.trim_start_matches("--placeholder="),
                )?);
            }
            "--json" => json = true,
            "-" => set_input(&mut input, token)?,
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => set_input(&mut input, other)?,
        }
    }

    Ok(Command::Where(WhereArgs {
        config,
        config_explicit,
        placeholder,
        json,
        input,
    }))
}

fn set_input(input: &mut Option<PathBuf>, value: &str) -> anyhow::Result<()> {
    if let Some(prev) = input {
        anyhow::bail!(
            "only one input file is accepted (got {} and {value})",
            prev.display()
        );
    }
    *input = Some(PathBuf::from(value));
    Ok(())
}

fn parse_placeholder(v: &str) -> anyhow::Result<Placeholder> {
    match v {
        "question" | "?" => Ok(Placeholder::Question),
        "dollar" | "$" => Ok(Placeholder::Dollar),
        other => anyhow::bail!("invalid --placeholder: {other} (expected question|dollar)"),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
predsql - compile JSON predicate trees into parameterized SQL

USAGE:
  predsql <COMMAND> [OPTIONS]

COMMANDS:
  where         Compile a WHERE tree and print SQL + parameters
  help          Print help

Run `predsql <command> --help` for more."
            );
        }
        HelpTopic::Where => {
            println!(
                "\
USAGE:
  predsql where [OPTIONS] [FILE|-]

Reads a JSON predicate tree from FILE (or stdin) such as
  [{{\"id\": 5}}, \"or\", [[{{\"%name\": \"a%\", \"!deleted_at\": null}}]]]
and prints the compiled SQL followed by the JSON parameter array.

OPTIONS:
  --config <FILE>           Config file path (default: predsql.toml, optional)
  --placeholder <STYLE>     question (?) or dollar ($1, $2, ...)
  --json                    Print one JSON object {{\"sql\", \"params\"}}
  -h, --help                Print help"
            );
        }
    }
}
