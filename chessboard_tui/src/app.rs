use std::sync::mpsc::{self, Receiver, Sender};

use chessboard_view::{
    AssetSource, BoardView, ControlAction, PieceCollections, PieceId, PointerEvent, PointerKind,
    Registration, Side, ViewConfig,
};
use ratatui::crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::screen::Screen;

/// Columns per cell.
pub const CELL_WIDTH: u16 = 5;
/// Rows per cell.
pub const CELL_HEIGHT: u16 = 2;

/// What the registered handlers report back to the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Control(ControlAction),
    Pointer(PointerEvent),
}

/// The controller: owns the model and the view, and turns clicks into
/// moves. Any piece can move anywhere; landing on a piece captures it.
pub struct App {
    pub view: BoardView,
    pub screen: Screen,
    model: PieceCollections,
    initial: PieceCollections,
    undo_stack: Vec<(PieceCollections, Side)>,
    redo_stack: Vec<(PieceCollections, Side)>,
    commands: Receiver<Command>,
    pub to_move: Side,
    pub started: bool,
    /// Set by a forfeit until the next restart.
    pub finished: bool,
    pub selected: Option<(usize, usize)>,
    pub cursor: (usize, usize),
    pub status: String,
    /// Where the board was drawn last, for mapping mouse clicks to cells.
    pub board_area: Option<Rect>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &ViewConfig,
        source: &impl AssetSource,
        position: PieceCollections,
    ) -> anyhow::Result<Self> {
        let mut screen = Screen::new();
        let mut view = BoardView::with_config(&mut screen, config, source)?;
        let (sender, commands) = mpsc::channel();

        let outcomes = [
            view.add_start_listener(send_control(&sender)),
            view.add_restart_listener(send_control(&sender)),
            view.add_forfeit_listener(send_control(&sender)),
            view.add_undo_listener(send_control(&sender)),
            view.add_redo_listener(send_control(&sender)),
        ];
        for (action, outcome) in ControlAction::ALL.into_iter().zip(outcomes) {
            if outcome == Registration::TargetNotFound {
                info!(?action, "Control disabled by config");
            }
        }
        for (rank, file) in view.dimension().coordinates() {
            let sender = sender.clone();
            let outcome = view.add_cell_interaction_listener(rank, file, move |event| {
                let _ = sender.send(Command::Pointer(event));
            });
            if !outcome.is_registered() {
                warn!(?outcome, "Could not wire cell");
            }
        }

        view.refresh_board(&position)?;
        Ok(Self {
            view,
            screen,
            initial: position.clone(),
            model: position,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            commands,
            to_move: Side::First,
            started: false,
            finished: false,
            selected: None,
            cursor: (0, 0),
            status: String::from("Press s to start"),
            board_area: None,
            should_quit: false,
        })
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let (rank, file) = self.cursor;
        let dimension = self.view.dimension();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up if rank + 1 < dimension.height() => self.cursor.0 += 1,
            KeyCode::Down if rank > 0 => self.cursor.0 -= 1,
            KeyCode::Right if file + 1 < dimension.width() => self.cursor.1 += 1,
            KeyCode::Left if file > 0 => self.cursor.1 -= 1,
            KeyCode::Enter | KeyCode::Char(' ') => self.press(rank, file),
            KeyCode::Char('m') => self.view.mark_position(),
            KeyCode::Char(c) => {
                if let Some(action) = action_for_key(c) {
                    if self.view.trigger(action) == 0 {
                        self.status = format!("{} is not available", action.label());
                    }
                }
            }
            _ => {}
        }
        self.process_commands();
    }

    /// A left click selects or moves like Enter does. Releasing the button
    /// over another cell drops the selected piece there.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Pressed,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Released,
            _ => return,
        };
        if let Some((rank, file)) = self.cell_at_position(mouse.column, mouse.row) {
            self.cursor = (rank, file);
            self.view.dispatch_pointer(PointerEvent { rank, file, kind });
        }
        self.process_commands();
    }

    fn press(&mut self, rank: usize, file: usize) {
        self.view.dispatch_pointer(PointerEvent {
            rank,
            file,
            kind: PointerKind::Pressed,
        });
    }

    fn cell_at_position(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.board_area?;
        if column < area.x || row < area.y {
            return None;
        }
        let file = usize::from((column - area.x) / CELL_WIDTH);
        let row_from_top = usize::from((row - area.y) / CELL_HEIGHT);
        let rank = self.view.dimension_height().checked_sub(row_from_top + 1)?;
        self.view.dimension().contains(rank, file).then_some((rank, file))
    }

    fn process_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::Control(action) => self.on_control(action),
                Command::Pointer(event) => self.on_pointer(event),
            }
        }
    }

    fn on_control(&mut self, action: ControlAction) {
        match action {
            ControlAction::Start => {
                if self.started {
                    self.status = String::from("Already started");
                } else if self.finished {
                    self.status = String::from("Game over, press r to play again");
                } else {
                    self.started = true;
                    self.view.set_score(Side::First, 0);
                    self.view.set_score(Side::Second, 0);
                    self.status = format!("{} to move", self.to_move);
                }
            }
            ControlAction::Restart => {
                self.model = self.initial.clone();
                self.undo_stack.clear();
                self.redo_stack.clear();
                self.to_move = Side::First;
                self.selected = None;
                self.started = true;
                self.finished = false;
                self.view.set_score(Side::First, 0);
                self.view.set_score(Side::Second, 0);
                self.status = String::from("Restarted");
                self.refresh();
            }
            ControlAction::Forfeit => {
                if !self.started {
                    return;
                }
                let winner = self.to_move.opponent();
                let score = self.view.score(winner).unwrap_or(0);
                self.view.set_score(winner, score + 1);
                self.started = false;
                self.finished = true;
                self.selected = None;
                self.status = format!("{} forfeits, press r to play again", self.to_move);
            }
            ControlAction::Undo => self.step_history(true),
            ControlAction::Redo => self.step_history(false),
        }
    }

    fn step_history(&mut self, backwards: bool) {
        let (from, to) = if backwards {
            (&mut self.undo_stack, &mut self.redo_stack)
        } else {
            (&mut self.redo_stack, &mut self.undo_stack)
        };
        let Some((model, to_move)) = from.pop() else {
            self.status = String::from("Nothing to do");
            return;
        };
        to.push((std::mem::replace(&mut self.model, model), self.to_move));
        self.to_move = to_move;
        self.selected = None;
        self.status = format!("{} to move", self.to_move);
        self.refresh();
    }

    fn on_pointer(&mut self, event: PointerEvent) {
        if event.kind == PointerKind::Released {
            // Only a drag ends away from the selected piece.
            match self.selected {
                Some(from) if from != (event.rank, event.file) => {
                    self.selected = None;
                    self.move_piece(from, (event.rank, event.file));
                }
                _ => {}
            }
            return;
        }
        if !self.started {
            self.status = String::from("Press s to start");
            return;
        }
        let target = (event.rank, event.file);
        match self.selected.take() {
            None => match self.own_piece_at(target) {
                Some(_) => self.selected = Some(target),
                None => self.status = format!("Pick a {} piece", self.to_move),
            },
            Some(from) if from == target => {}
            Some(from) => self.move_piece(from, target),
        }
    }

    fn own_piece_at(&self, (rank, file): (usize, usize)) -> Option<PieceId> {
        match self.model.piece_at(rank as i8, file as i8) {
            Some((side, id)) if side == self.to_move => Some(id),
            _ => None,
        }
    }

    fn move_piece(&mut self, from: (usize, usize), to: (usize, usize)) {
        let Some(id) = self.own_piece_at(from) else {
            return;
        };
        if self.own_piece_at(to).is_some() {
            self.selected = Some(to);
            return;
        }
        self.undo_stack.push((self.model.clone(), self.to_move));
        self.redo_stack.clear();

        if let Some((side, captured)) = self.model.piece_at(to.0 as i8, to.1 as i8) {
            if let Some(piece) = self.model.get_mut(side, captured) {
                piece.removed = true;
            }
        }
        if let Some(piece) = self.model.get_mut(self.to_move, id) {
            piece.rank = to.0 as i8;
            piece.file = to.1 as i8;
        }
        self.to_move = self.to_move.opponent();
        self.status = format!("{} to move", self.to_move);
        self.refresh();
    }

    fn refresh(&mut self) {
        if let Err(err) = self.view.refresh_board(&self.model) {
            warn!(%err, "Could not show the position");
            self.status = err.to_string();
        }
    }
}

fn send_control(sender: &Sender<Command>) -> impl FnMut(ControlAction) + 'static {
    let sender = sender.clone();
    move |action| {
        let _ = sender.send(Command::Control(action));
    }
}

fn action_for_key(c: char) -> Option<ControlAction> {
    match c {
        's' => Some(ControlAction::Start),
        'r' => Some(ControlAction::Restart),
        'f' => Some(ControlAction::Forfeit),
        'u' => Some(ControlAction::Undo),
        'y' => Some(ControlAction::Redo),
        _ => None,
    }
}

/// The key that triggers a control, for the button captions.
pub fn key_for_action(action: ControlAction) -> char {
    match action {
        ControlAction::Start => 's',
        ControlAction::Restart => 'r',
        ControlAction::Forfeit => 'f',
        ControlAction::Undo => 'u',
        ControlAction::Redo => 'y',
    }
}
