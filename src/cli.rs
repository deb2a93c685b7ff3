use anyhow::{anyhow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Read commands from stdin, write a JSON snapshot per change to stdout.
    Play { seed: Option<u32>, classic: bool },
    /// Replay an event log and print its final snapshot.
    Replay { path: String },
}

pub const USAGE: &str = "usage: blockfall play [--seed N] [--classic]\n       blockfall replay <log.jsonl>";

pub fn parse_args(args: &[String]) -> Result<CliCommand> {
    match args.first().map(String::as_str) {
        None | Some("play") => parse_play_args(args.get(1..).unwrap_or(&[])),
        Some("replay") => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("replay: missing log path"))?;
            if let Some(extra) = args.get(2) {
                return Err(anyhow!("replay: unknown argument: {}", extra));
            }
            Ok(CliCommand::Replay { path: path.clone() })
        }
        Some(other) => Err(anyhow!("unknown subcommand: {}\n{}", other, USAGE)),
    }
}

fn parse_play_args(args: &[String]) -> Result<CliCommand> {
    let mut seed = None;
    let mut classic = false;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("play: missing value for --seed"))?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("play: invalid --seed value: {}", v))?,
                );
            }
            "--classic" => classic = true,
            other => {
                return Err(anyhow!("play: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(CliCommand::Play { seed, classic })
}
