//! The dashboard catalog: sections, filters, labels and sidebar stats.
//!
//! One parameterized component tree; each section pairs a query spec with
//! its presenter configuration, and the TUI composes them.

pub mod filters;
pub mod labels;
pub mod sections;
pub mod world;

pub use filters::{FilterState, SelectOptions};
pub use sections::{render_section, SectionId, Tab};
pub use world::{load_world_stats, WorldStats};

use crate::error::Result;
use crate::query::{OptionList, QuerySpec, Runner};

/// Loads every select-box option list through the runner (and cache).
pub async fn load_options(runner: &Runner) -> Result<SelectOptions> {
    let species = runner.run(&QuerySpec::Options(OptionList::Species)).await?;
    let fruit_types = runner
        .run(&QuerySpec::Options(OptionList::FruitTypes))
        .await?;
    let alliances = runner
        .run(&QuerySpec::Options(OptionList::Alliances))
        .await?;
    let poneglyph_types = runner
        .run(&QuerySpec::Options(OptionList::PoneglyphTypes))
        .await?;
    let regions = runner.run(&QuerySpec::Options(OptionList::Regions)).await?;

    Ok(SelectOptions::from_tables(
        &species,
        &fruit_types,
        &alliances,
        &poneglyph_types,
        &regions,
    ))
}
