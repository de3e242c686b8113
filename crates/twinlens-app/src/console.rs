use std::io::{self, BufRead};

use anyhow::Context;
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use twinlens_types::{Point, WindowEvent, WindowId, WindowPosition};

use crate::controller::PairInput;
use crate::events::ExitRequest;

pub const USAGE: &str = "<window> <down X Y | move X Y | up | shot | next | prev | copy | hide | pos X Y | exit>";

/// Parses `<window> <command> [args]`; blank lines and `#` comments give `None`
pub fn parse_line(line: &str) -> anyhow::Result<Option<(WindowId, WindowEvent)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let window = parts.next().context("Missing window")?;
    let id: u32 = window
        .parse()
        .with_context(|| format!("Bad window id {window:?}"))?;
    let id = match WindowId(id) {
        id @ (WindowId::FIRST | WindowId::SECOND) => id,
        other => anyhow::bail!("There is no window {}", other),
    };

    let command = parts.next().context("Missing command")?;
    let args: Vec<&str> = parts.collect();

    let event = match command {
        "down" => WindowEvent::PointerDown(point(&args)?),
        "move" => WindowEvent::PointerMove(point(&args)?),
        "up" => WindowEvent::PointerUp,
        "shot" => WindowEvent::TakeScreenshot,
        "next" => WindowEvent::NextTranslation,
        "prev" => WindowEvent::PreviousTranslation,
        "copy" => WindowEvent::CopySourceText,
        "hide" => WindowEvent::ToggleVisibility,
        "pos" => {
            let [x, y] = pair(&args)?;
            WindowEvent::WindowMoved(WindowPosition::new(x, y))
        }
        "exit" => WindowEvent::Exit,
        other => anyhow::bail!("Unknown command {other:?}"),
    };

    Ok(Some((id, event)))
}

fn pair<T: std::str::FromStr>(args: &[&str]) -> anyhow::Result<[T; 2]>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let [x, y] = args else {
        anyhow::bail!("Expected two numbers, got {}", args.len());
    };
    Ok([
        x.parse().with_context(|| format!("Bad number {x:?}"))?,
        y.parse().with_context(|| format!("Bad number {y:?}"))?,
    ])
}

fn point(args: &[&str]) -> anyhow::Result<Point> {
    let [x, y] = pair::<f64>(args)?;
    Ok(Point::new(x, y))
}

/// Reads stdin on a plain thread so a pending read never holds up runtime shutdown
pub fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded(16);
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("[CONSOLE] Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx.to_async()
}

/// Feeds lines into the pair until cancelled; end of input asks the pair to exit
pub async fn console_loop(
    lines: AsyncReceiver<String>,
    input: PairInput,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[CONSOLE] Ready: {}", USAGE);

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.recv() => line,
        };

        let Ok(line) = line else {
            tracing::info!("[CONSOLE] Input closed");
            input.request_exit(ExitRequest::InputClosed).await;
            break;
        };

        match parse_line(&line) {
            Ok(Some((id, event))) => {
                if let Err(e) = input.send(id, event).await {
                    tracing::warn!("[CONSOLE] {:#}", e);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("[CONSOLE] {:#} (usage: {})", e, USAGE),
        }
    }

    Ok(())
}
