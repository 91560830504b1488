use crate::{ControlAction, Dimension, FILE_LETTERS};

/// Where around the board a panel goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    North,
    South,
    East,
    West,
    Center,
}

/// A surface the view hands to its container.
///
/// Panels only describe what goes where. Their live contents (icons,
/// overlays, scores) are read back from the view when drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    /// The grid of cells.
    Board(Dimension),
    /// One label per playing side, e.g. `"Player_0's score"`.
    Scoreboard(Vec<String>),
    /// Rank numbers, top to bottom.
    RankLabels(Vec<String>),
    /// File letters, left to right.
    FileLabels(Vec<String>),
    /// Control buttons, top to bottom.
    Controls(Vec<ControlAction>),
}

/// The container the external controller provides.
pub trait ContentPane {
    fn insert(&mut self, region: Region, panel: Panel);
}

/// The panels for a board of the given size, in insertion order.
pub(crate) fn panels(dimension: Dimension, controls: Vec<ControlAction>) -> Vec<(Region, Panel)> {
    let ranks = (1..=dimension.height()).rev().map(|rank| rank.to_string()).collect();
    let files = FILE_LETTERS[..dimension.width()]
        .iter()
        .map(char::to_string)
        .collect();
    let scores = (0..2).map(|idx| format!("Player_{idx}'s score")).collect();
    vec![
        (Region::Center, Panel::Board(dimension)),
        (Region::South, Panel::FileLabels(files)),
        (Region::West, Panel::RankLabels(ranks)),
        (Region::North, Panel::Scoreboard(scores)),
        (Region::East, Panel::Controls(controls)),
    ]
}

impl ContentPane for Vec<(Region, Panel)> {
    fn insert(&mut self, region: Region, panel: Panel) {
        self.push((region, panel));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_dimension() {
        let panels = panels(Dimension::new(3, 2).unwrap(), vec![ControlAction::Start]);
        assert!(panels.contains(&(
            Region::West,
            Panel::RankLabels(vec!["3".into(), "2".into(), "1".into()])
        )));
        assert!(panels.contains(&(
            Region::South,
            Panel::FileLabels(vec!["A".into(), "B".into()])
        )));
        assert!(panels.contains(&(
            Region::North,
            Panel::Scoreboard(vec!["Player_0's score".into(), "Player_1's score".into()])
        )));
    }
}
