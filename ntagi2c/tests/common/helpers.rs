// helpers.rs — logger setup and tag builders shared by integration tests

use ntagi2c::prelude::*;
use ntagi2c::transport::{MockTag, SimulatedTag};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Demo-board tag whose embedded side stays busy forever.
pub fn busy_tag(product: TagProduct) -> MockTag {
    MockTag::new(SimulatedTag::new(product).with_embedded_script([], Some(SlotState::Busy)))
}

/// Tag that only answers READ and WRITE.
pub fn passive_only_tag(product: TagProduct) -> MockTag {
    MockTag::new(
        SimulatedTag::new(product)
            .without_get_version()
            .without_sector_select()
            .with_embedded_script([], Some(SlotState::Idle)),
    )
}
