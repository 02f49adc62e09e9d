//! Walk through the demo-board workflow on a simulated NTAG I2C plus 2k:
//! write a text message, read it back, run the read loop for a moment and
//! restore the factory content.
//!
//! Usage:
//!   RUST_LOG=info cargo run -p ntagi2c --example simulated_demo

use std::time::Duration;

use ntagi2c::prelude::*;
use ntagi2c::transport::{MockTag, SimulatedTag};
use ntagi2c::utils::format_pages;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // the embedded side is busy for a few polls before it lets go
    let tag = MockTag::new(SimulatedTag::new(TagProduct::NtagPlus2k).with_embedded_script(
        [SlotState::Busy, SlotState::Busy],
        Some(SlotState::Idle),
    ));
    let mut demo = Demo::discover(&tag, DemoConfig::default())?;
    println!("product: {}", demo.product()?);

    if let DemoReport::Write(report) =
        demo.run(DemoRequest::WriteText("Hello from ntagi2c".into()))?
    {
        println!("write: {} ({:?})", report.stats, report.handshake);
    }
    println!("NDEF: {:?}", demo.read_ndef()?.first_text());

    let report = demo.read_once()?;
    println!("read: {}", report.stats);
    print!("{}", format_pages(0, &report.data[..16 * 4]));

    let read_loop = demo.start_read_loop(|result| match result {
        Ok(report) => println!("loop: {}", report.stats),
        Err(e) => eprintln!("loop error: {}", e),
    });
    std::thread::sleep(Duration::from_millis(50));
    let mut demo = read_loop.stop()?;

    demo.write_default_ndef()?;
    let restored = demo.read_ndef()?;
    println!("restored {} factory records", restored.records().len());
    Ok(())
}
