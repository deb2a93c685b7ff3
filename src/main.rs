//! Blockfall runner (default binary).
//!
//! `play` hosts a live session: one command per stdin line (wire names such
//! as `moveLeft` or `hardDrop`), one JSON snapshot per state change on
//! stdout. `replay` checks an event log and prints where it ends up.

mod cli;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use blockfall::core::{EngineConfig, GameSnapshot};
use blockfall::engine::{replay_file, HostConfig, SessionHost};
use blockfall::types::Command;

use crate::cli::{parse_args, CliCommand};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        CliCommand::Play { seed, classic } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(play(seed, classic))
        }
        CliCommand::Replay { path } => {
            let report = replay_file(&path)?;
            eprintln!(
                "[blockfall] replayed {}: sessions={} commands={} ticks={} locks={}",
                path, report.sessions, report.commands, report.ticks, report.locks
            );
            println!("{}", serde_json::to_string(&report.snapshot)?);
            Ok(())
        }
    }
}

async fn write_snapshot(out: &mut tokio::io::Stdout, snap: &GameSnapshot) -> Result<()> {
    let mut line = serde_json::to_vec(snap)?;
    line.push(b'\n');
    out.write_all(&line).await?;
    out.flush().await?;
    Ok(())
}

async fn play(seed: Option<u32>, classic: bool) -> Result<()> {
    let mut host_config = HostConfig::from_env();
    if seed.is_some() {
        host_config.seed = seed;
    }
    let engine_config = if classic {
        EngineConfig::classic()
    } else {
        EngineConfig::from_env()
    };

    let host = SessionHost::start(host_config, engine_config).await?;
    let mut snapshots = host.subscribe();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let first = *snapshots.borrow_and_update();
    write_snapshot(&mut stdout, &first).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match Command::from_str(trimmed) {
                    Some(command) => host.send(command).await?,
                    None => eprintln!("[blockfall] unknown command: {}", trimmed),
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = *snapshots.borrow_and_update();
                write_snapshot(&mut stdout, &snap).await?;
            }
        }
    }

    let last_seen = *snapshots.borrow();
    let final_snapshot = host.finish().await?;
    if final_snapshot != last_seen {
        write_snapshot(&mut stdout, &final_snapshot).await?;
    }
    eprintln!(
        "[blockfall] session ended: score={} level={} lines={}",
        final_snapshot.score, final_snapshot.level, final_snapshot.lines
    );
    Ok(())
}
