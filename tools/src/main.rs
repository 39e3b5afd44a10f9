//! kiosk-runner: headless driver for the drive-thru window kiosk.
//!
//! Usage:
//!   kiosk-runner --data-dir ./data --db kiosk.db --ipc-mode
//!   kiosk-runner --demo

use anyhow::Result;
use kiosk_core::{
    command::KioskCommand,
    config::KioskConfig,
    engine::KioskEngine,
    event::KioskEvent,
    role::Role,
    store::KioskStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Search { query: String },
    Command { cmd: KioskCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let demo = args.iter().any(|a| a == "--demo");
    let db = arg_value(&args, "--db").unwrap_or(":memory:");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");

    let config = if demo {
        KioskConfig::default_test()
    } else {
        KioskConfig::load(data_dir)?
    };

    let store = KioskStore::open(db)?;
    store.migrate()?;
    let mut engine = KioskEngine::build(config).with_store(store);

    if !ipc_mode {
        println!("Drive-Thru Window Kiosk — kiosk-runner");
        println!("  device:    {}", engine.config().device_id);
        println!("  location:  {}", engine.config().location_id);
        println!("  staff:     {}", engine.directory().len());
        println!("  db:        {db}");
        println!();
    }

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        run_demo(&mut engine)?;
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut KioskEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&engine.snapshot())?)?;
            }
            IpcRequest::Search { query } => {
                writeln!(stdout, "{}", serde_json::to_string(&engine.search(&query))?)?;
            }
            IpcRequest::Command { cmd } => match engine.apply(cmd) {
                Ok(events) => {
                    let reply = serde_json::json!({
                        "events": events,
                        "state": engine.snapshot(),
                    });
                    writeln!(stdout, "{reply}")?;
                }
                Err(e) if e.is_precondition() => {
                    log::debug!("ipc: command rejected: {e}");
                    writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                }
                Err(e) => return Err(e.into()),
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

/// A scripted two-role shift, start to clock-out.
fn run_demo(engine: &mut KioskEngine) -> Result<()> {
    let script = [
        KioskCommand::ToggleRole { role: Role::Runner },
        KioskCommand::ToggleRole { role: Role::Packer },
        KioskCommand::AssignRole { role: Role::Runner, employee_id: "1002".into() },
        KioskCommand::AssignRole { role: Role::Packer, employee_id: "1003".into() },
        KioskCommand::Start,
        KioskCommand::NextTip,
        KioskCommand::ClockOut,
    ];

    for cmd in script {
        let name = cmd.name();
        let events = engine.apply(cmd)?;
        println!("  {name:<12} ready={:<5} mode={}", engine.is_ready(), engine.mode().tag());
        for event in &events {
            if let KioskEvent::ShiftCompleted { record, delivered } = event {
                println!();
                println!("=== CLOCKED OUT (delivered: {delivered}) ===");
                println!("{}", serde_json::to_string_pretty(record)?);
            }
        }
    }

    if let Some(store) = engine.store() {
        println!();
        println!("  events logged: {}", store.event_count()?);
    }
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
