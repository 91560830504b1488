use std::collections::BTreeMap;

use chessboard_view::{ContentPane, Panel, Region};
use tracing::debug;

/// The terminal's content pane: remembers which panel the view put where.
#[derive(Debug, Default)]
pub struct Screen {
    panels: BTreeMap<Region, Panel>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, region: Region) -> Option<&Panel> {
        self.panels.get(&region)
    }

    pub fn labels(&self, region: Region) -> &[String] {
        match self.panels.get(&region) {
            Some(Panel::Scoreboard(labels) | Panel::RankLabels(labels) | Panel::FileLabels(labels)) => {
                labels
            }
            _ => &[],
        }
    }
}

impl ContentPane for Screen {
    fn insert(&mut self, region: Region, panel: Panel) {
        debug!(?region, "Attached panel");
        self.panels.insert(region, panel);
    }
}
