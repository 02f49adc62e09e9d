//! Run the capability probe against simulated tags of every product and
//! print which reader each pairing gets.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p ntagi2c --example probe_report

use ntagi2c::prelude::*;
use ntagi2c::transport::{MockTag, SimulatedTag};

fn describe(label: &str, tag: &MockTag) -> anyhow::Result<()> {
    match probe(tag) {
        Ok(mut reader) => {
            reader.connect()?;
            let product = reader.product()?;
            let uid = reader.read_uid()?;
            println!(
                "{:<28} {:<8} {:<18} uid {}  capacity {} bytes",
                label,
                reader.kind().to_string(),
                product.to_string(),
                uid,
                reader.write_capacity()?
            );
            reader.close()?;
        }
        Err(e) => println!("{:<28} {}", label, e),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    for product in [
        TagProduct::Ntag1k,
        TagProduct::Ntag2k,
        TagProduct::Ntag2kV,
        TagProduct::NtagPlus1k,
        TagProduct::NtagPlus2k,
    ] {
        describe(&format!("{} (full)", product), &MockTag::new(SimulatedTag::new(product)))?;
        describe(
            &format!("{} (no GET_VERSION)", product),
            &MockTag::new(SimulatedTag::new(product).without_get_version()),
        )?;
        describe(
            &format!("{} (slow phone)", product),
            &MockTag::new(SimulatedTag::new(product).with_min_timeout(100)),
        )?;
    }

    let mut foreign = SimulatedTag::new(TagProduct::Ntag1k)
        .without_get_version()
        .without_sector_select();
    foreign.set_page(0, 3, [0xE1, 0x10, 0x3F, 0x00]);
    describe("NTAG213-like tag", &MockTag::new(foreign))?;
    Ok(())
}
