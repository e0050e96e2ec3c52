#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/assemble.rs"]
mod assemble;

#[path = "integration/listing.rs"]
mod listing;

#[path = "integration/eui64.rs"]
mod eui64;

#[path = "integration/dupes.rs"]
mod dupes;

#[path = "integration/imslp.rs"]
mod imslp;
