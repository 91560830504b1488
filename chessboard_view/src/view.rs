use tracing::{debug, trace, warn};

use crate::pane::panels;
use crate::{
    AssetSource, Assets, Cell, ContentPane, ControlAction, Dimension, EventWiring, GameModel,
    Grid, Icon, IconCache, PlacementError, PointerEvent, Registration, Side, Tile, TileKind,
    ViewConfig, ViewError,
};

/// The board as the player sees it: a grid of tiled cells with piece icons,
/// plus the registration points for clicks and game controls.
///
/// The view owns everything it draws. It is built once, then repainted from
/// a [`GameModel`] whenever the game changes.
#[derive(Debug)]
pub struct BoardView {
    assets: Assets,
    grid: Grid,
    wiring: EventWiring,
    scores: [Option<u32>; 2],
}

/// An icon to be drawn at a cell, checked against the board.
struct Placement {
    rank: usize,
    file: usize,
    icon: Icon,
}

impl BoardView {
    /// Builds a regular view of `height` x `width` cells with all controls.
    pub fn new(
        pane: &mut dyn ContentPane,
        height: u8,
        width: u8,
        source: &impl AssetSource,
    ) -> Result<Self, ViewError> {
        let config = ViewConfig {
            dimension: Dimension::new(height, width)?,
            ..ViewConfig::default()
        };
        Self::with_config(pane, &config, source)
    }

    /// Loads all assets, builds the grid and inserts the panels into `pane`.
    ///
    /// Fails without touching `pane` if any asset cannot be loaded.
    pub fn with_config(
        pane: &mut dyn ContentPane,
        config: &ViewConfig,
        source: &impl AssetSource,
    ) -> Result<Self, ViewError> {
        let assets = Assets::load(source)?;
        let grid = Grid::new(config.dimension, &assets.tiles);
        let wiring = EventWiring::new(config.dimension, &config.controls);

        for (region, panel) in panels(config.dimension, wiring.controls().collect()) {
            pane.insert(region, panel);
        }
        debug!(
            height = config.dimension.height(),
            width = config.dimension.width(),
            "Constructed board view"
        );

        Ok(Self {
            assets,
            grid,
            wiring,
            scores: [None; 2],
        })
    }

    /// Clears every icon, then paints the pieces of `model`.
    ///
    /// Afterwards the grid shows exactly the pieces of `model` that are on
    /// the board. On error nothing is cleared or painted.
    pub fn refresh_board(&mut self, model: &impl GameModel) -> Result<(), PlacementError> {
        let placements = self.placements(model)?;
        for cell in self.grid.iter_mut() {
            cell.set_icon(None);
        }
        self.paint(placements);
        Ok(())
    }

    /// Paints the pieces of `model` on top of the current icons, first side
    /// first. Cells without a piece keep whatever they showed before.
    ///
    /// Every piece still on the board is checked before anything is painted.
    pub fn update_pieces_configuration(
        &mut self,
        model: &impl GameModel,
    ) -> Result<(), PlacementError> {
        let placements = self.placements(model)?;
        self.paint(placements);
        Ok(())
    }

    fn placements(&self, model: &impl GameModel) -> Result<Vec<Placement>, PlacementError> {
        let dimension = self.grid.dimension();
        let mut placements = Vec::new();
        for side in Side::PLAYING {
            for piece in model.pieces(side).filter(|piece| piece.is_on_board()) {
                let (rank, file) = dimension.checked_index(piece.rank, piece.file).ok_or(
                    PlacementError::OutOfBounds {
                        side: piece.side,
                        kind: piece.kind,
                        rank: piece.rank,
                        file: piece.file,
                    },
                )?;
                let icon = self
                    .assets
                    .icons
                    .get(piece.side, piece.kind)
                    .ok_or(PlacementError::Unowned { kind: piece.kind })?;
                placements.push(Placement {
                    rank,
                    file,
                    icon: icon.clone(),
                });
            }
        }
        Ok(placements)
    }

    fn paint(&mut self, placements: Vec<Placement>) {
        let mut painted = vec![false; self.grid.dimension().area()];
        for Placement { rank, file, icon } in placements {
            trace!(rank, file, side = %icon.side(), kind = %icon.kind(), "Placing piece");
            let idx = rank * self.grid.dimension().width() + file;
            if std::mem::replace(&mut painted[idx], true) {
                warn!(rank, file, "Two pieces on the same cell, keeping the later one");
            }
            if let Some(cell) = self.grid.get_mut(rank, file) {
                cell.set_icon(Some(icon));
            }
        }
    }

    /// Writes each cell's own `(rank,file)` into its overlay text.
    pub fn mark_position(&mut self) {
        for cell in self.grid.iter_mut() {
            let text = format!("({},{})", cell.rank(), cell.file());
            cell.set_overlay(text);
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.grid.dimension()
    }

    pub fn dimension_height(&self) -> usize {
        self.grid.dimension().height()
    }

    pub fn dimension_width(&self) -> usize {
        self.grid.dimension().width()
    }

    /// Returns `None` outside the board.
    pub fn cell_at(&self, rank: usize, file: usize) -> Option<&Cell> {
        self.grid.get(rank, file)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn icons(&self) -> &IconCache {
        &self.assets.icons
    }

    pub fn tile(&self, kind: TileKind) -> &Tile {
        self.assets.tiles.get(kind)
    }

    /// The controls of this view, in display order.
    pub fn controls(&self) -> impl Iterator<Item = ControlAction> + '_ {
        self.wiring.controls()
    }

    pub fn add_start_listener(
        &mut self,
        handler: impl FnMut(ControlAction) + 'static,
    ) -> Registration {
        self.wiring
            .add_control_listener(ControlAction::Start, Box::new(handler))
    }

    pub fn add_restart_listener(
        &mut self,
        handler: impl FnMut(ControlAction) + 'static,
    ) -> Registration {
        self.wiring
            .add_control_listener(ControlAction::Restart, Box::new(handler))
    }

    pub fn add_forfeit_listener(
        &mut self,
        handler: impl FnMut(ControlAction) + 'static,
    ) -> Registration {
        self.wiring
            .add_control_listener(ControlAction::Forfeit, Box::new(handler))
    }

    pub fn add_undo_listener(
        &mut self,
        handler: impl FnMut(ControlAction) + 'static,
    ) -> Registration {
        self.wiring
            .add_control_listener(ControlAction::Undo, Box::new(handler))
    }

    pub fn add_redo_listener(
        &mut self,
        handler: impl FnMut(ControlAction) + 'static,
    ) -> Registration {
        self.wiring
            .add_control_listener(ControlAction::Redo, Box::new(handler))
    }

    /// Registers a handler for pointer events on the cell at `(rank, file)`.
    pub fn add_cell_interaction_listener(
        &mut self,
        rank: usize,
        file: usize,
        handler: impl FnMut(PointerEvent) + 'static,
    ) -> Registration {
        self.wiring.add_cell_listener(rank, file, Box::new(handler))
    }

    /// Runs the handlers of a control, e.g. when its button is pressed.
    pub fn trigger(&mut self, action: ControlAction) -> usize {
        self.wiring.trigger(action)
    }

    /// Runs the handlers of the cell the event happened on.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> usize {
        self.wiring.dispatch_pointer(event)
    }

    /// Shows `score` for a playing side. Ignored for [`Side::Unoccupied`].
    pub fn set_score(&mut self, side: Side, score: u32) {
        if let Some(idx) = side.index() {
            self.scores[idx] = Some(score);
        }
    }

    pub fn score(&self, side: Side) -> Option<u32> {
        self.scores[side.index()?]
    }
}

impl std::fmt::Display for BoardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(&self.grid))
    }
}
