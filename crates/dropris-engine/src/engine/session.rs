use std::time::Duration;

use crate::{
    ActionError, Advertisement, AudioSink, Board, ClearKind, GameStats, GameSummary, Level,
    LineClearPhase, Piece, PieceCollisionError, PieceKind, PieceQueue, PieceSeed, SessionEvent,
    SoundCue,
};

/// Rows removed by the sacrifice shortcut.
pub const SACRIFICE_ROWS: usize = 10;

/// Rows filled by the debug four-row clear.
const DEBUG_TETRIS_ROWS: usize = 4;

/// Startup parameters of a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub level: Level,
    /// Enables [`GameAction::DebugForceTetris`](crate::GameAction::DebugForceTetris)
    /// and [`GameAction::DebugForceMilestone`](crate::GameAction::DebugForceMilestone).
    pub debug: bool,
    /// Fixed randomizer seed. A random one is drawn when absent.
    pub seed: Option<PieceSeed>,
}

/// Observable phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Falling,
    Paused,
    /// Completed rows are flashing; input is ignored until they are removed.
    LineClearing,
    GameOver,
}

#[derive(Debug, Clone, Copy, Default)]
enum SummaryGate {
    #[default]
    Pending,
    AwaitingAdvertisement(GameSummary),
    Released(GameSummary),
}

/// One game from the first spawn to game over.
///
/// Spawning and locking happen inside the calls that trigger them, so the
/// session is only ever observed in one of the [`SessionState`] phases. A
/// falling piece exists exactly while the state is `Falling` or `Paused`.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    queue: PieceQueue,
    falling_piece: Option<Piece>,
    state: SessionState,
    stats: GameStats,
    fall_elapsed: Duration,
    line_clear: Option<LineClearPhase>,
    hold_used: bool,
    sacrifice_used: bool,
    milestone_shown: bool,
    muted: bool,
    resume_pending: bool,
    summary: SummaryGate,
    events: Vec<SessionEvent>,
    audio: Option<Box<dyn AudioSink>>,
    advertisement: Option<Box<dyn Advertisement>>,
}

fn new_queue(seed: Option<PieceSeed>) -> PieceQueue {
    seed.map_or_else(PieceQueue::new, PieceQueue::with_seed)
}

impl GameSession {
    /// Starts a session and spawns its first piece.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let mut this = Self {
            config,
            board: Board::EMPTY,
            queue: new_queue(config.seed),
            falling_piece: None,
            state: SessionState::Falling,
            stats: GameStats::new(config.level),
            fall_elapsed: Duration::ZERO,
            line_clear: None,
            hold_used: false,
            sacrifice_used: false,
            milestone_shown: false,
            muted: false,
            resume_pending: false,
            summary: SummaryGate::Pending,
            events: vec![],
            audio: None,
            advertisement: None,
        };
        tracing::info!(level = config.level.get(), debug = config.debug, "session started");
        this.spawn_next();
        this
    }

    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = Some(audio);
        self
    }

    #[must_use]
    pub fn with_advertisement(mut self, advertisement: Box<dyn Advertisement>) -> Self {
        self.advertisement = Some(advertisement);
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    /// Where the falling piece would land on a hard drop.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.falling_piece
            .as_ref()
            .map(|piece| piece.drop_position(&self.board))
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.queue.held()
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    pub fn next_pieces(&self, n: usize) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.peek(n)
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn sacrifice_used(&self) -> bool {
        self.sacrifice_used
    }

    /// Rows currently flashing before removal.
    #[must_use]
    pub fn flashing_rows(&self) -> &[usize] {
        self.line_clear
            .as_ref()
            .map(LineClearPhase::rows)
            .unwrap_or_default()
    }

    /// Whether the flashing rows are in the visible half of their blink.
    #[must_use]
    pub fn flashing_rows_visible(&self) -> bool {
        self.line_clear
            .as_ref()
            .is_none_or(LineClearPhase::rows_visible)
    }

    /// Summary of a finished game, once the advertisement gate (if any) has
    /// opened.
    #[must_use]
    pub fn game_summary(&self) -> Option<GameSummary> {
        match self.summary {
            SummaryGate::Released(summary) => Some(summary),
            SummaryGate::Pending | SummaryGate::AwaitingAdvertisement(_) => None,
        }
    }

    /// Whether game over is waiting for the advertisement to finish.
    #[must_use]
    pub fn is_awaiting_advertisement(&self) -> bool {
        matches!(self.summary, SummaryGate::AwaitingAdvertisement(_))
    }

    /// Takes the events recorded since the previous call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the session clock by one frame.
    ///
    /// While falling, gravity moves the piece down one row each time the
    /// accumulated time exceeds the level's drop interval. While clearing,
    /// the flash animation advances instead. The first frame after resuming
    /// from pause counts as zero time.
    pub fn update(&mut self, elapsed: Duration) {
        let elapsed = if std::mem::take(&mut self.resume_pending) {
            Duration::ZERO
        } else {
            elapsed
        };
        match self.state {
            SessionState::Paused => {}
            SessionState::Falling => {
                self.fall_elapsed += elapsed;
                if self.fall_elapsed > self.config.level.drop_interval() {
                    self.fall_elapsed = Duration::ZERO;
                    self.step_down();
                }
            }
            SessionState::LineClearing => {
                if let Some(phase) = &mut self.line_clear
                    && phase.advance(elapsed)
                {
                    self.finish_line_clear();
                }
            }
            SessionState::GameOver => self.advance_advertisement(elapsed),
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), ActionError> {
        let piece = self.ensure_falling()?.left();
        self.try_replace_falling_piece(piece)
    }

    pub fn try_move_right(&mut self) -> Result<(), ActionError> {
        let piece = self.ensure_falling()?.right();
        self.try_replace_falling_piece(piece)
    }

    /// Rotates clockwise in place. A rotation that would collide is rejected.
    pub fn try_rotate(&mut self) -> Result<(), ActionError> {
        let piece = self.ensure_falling()?.rotated_cw();
        self.try_replace_falling_piece(piece)
    }

    /// Moves down one row, locking the piece if it cannot move.
    ///
    /// The gravity timer keeps running across soft drops.
    pub fn try_soft_drop(&mut self) -> Result<(), ActionError> {
        let piece = self.ensure_falling()?.down();
        if self.board.is_colliding(&piece) {
            self.lock_falling_piece();
        } else {
            self.falling_piece = Some(piece);
        }
        Ok(())
    }

    pub fn hard_drop(&mut self) -> Result<(), ActionError> {
        let piece = self.ensure_falling()?.drop_position(&self.board);
        self.falling_piece = Some(piece);
        self.lock_falling_piece();
        Ok(())
    }

    /// Stores the falling piece and continues with the held one, or with the
    /// next queued piece if nothing was held. Allowed once per piece.
    pub fn try_hold(&mut self) -> Result<(), ActionError> {
        let kind = self.ensure_falling()?.kind();
        if self.hold_used {
            return Err(ActionError::HoldAlreadyUsed);
        }
        let next = self.queue.swap_hold(kind);
        tracing::debug!(held = %kind, next = %next, "piece held");
        self.events.push(SessionEvent::PieceHeld(kind));
        self.enter_piece(next);
        self.hold_used = true;
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), ActionError> {
        match self.state {
            SessionState::Falling => {
                self.state = SessionState::Paused;
                self.events.push(SessionEvent::Paused);
            }
            SessionState::Paused => {
                self.state = SessionState::Falling;
                self.resume_pending = true;
                self.events.push(SessionEvent::Resumed);
            }
            SessionState::LineClearing | SessionState::GameOver => {
                return Err(ActionError::NotPlaying);
            }
        }
        Ok(())
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.events.push(SessionEvent::MuteToggled { muted: self.muted });
    }

    /// Removes the bottom [`SACRIFICE_ROWS`] rows without scoring them.
    ///
    /// Usable once per game. Using it makes the advertisement play at game
    /// over.
    pub fn sacrifice_bottom_rows(&mut self) -> Result<(), ActionError> {
        let kind = self.ensure_falling()?.kind();
        if self.sacrifice_used {
            return Err(ActionError::SacrificeAlreadyUsed);
        }
        let removed = self.board.sacrifice_bottom_rows(SACRIFICE_ROWS);
        self.sacrifice_used = true;
        tracing::info!(removed, "bottom rows sacrificed");
        self.events.push(SessionEvent::RowsSacrificed(removed));
        self.respawn_if_buried(kind);
        Ok(())
    }

    /// Starts over with an empty board, zeroed stats and a fresh queue.
    ///
    /// Accepted in every state. The mute setting is kept.
    pub fn restart(&mut self) {
        tracing::info!(score = self.stats.score(), "session restarted");
        self.board = Board::EMPTY;
        self.queue = new_queue(self.config.seed);
        self.stats = GameStats::new(self.config.level);
        self.falling_piece = None;
        self.line_clear = None;
        self.fall_elapsed = Duration::ZERO;
        self.hold_used = false;
        self.sacrifice_used = false;
        self.milestone_shown = false;
        self.resume_pending = false;
        self.summary = SummaryGate::Pending;
        self.events.push(SessionEvent::Restarted);
        self.spawn_next();
    }

    /// Fills the bottom four rows and hard-drops the falling piece.
    pub fn debug_force_tetris(&mut self) -> Result<(), ActionError> {
        if !self.config.debug {
            return Err(ActionError::DebugDisabled);
        }
        let kind = self.ensure_falling()?.kind();
        for y in Board::HEIGHT - DEBUG_TETRIS_ROWS..Board::HEIGHT {
            self.board.fill_row(y, PieceKind::I);
        }
        self.respawn_if_buried(kind);
        if self.state.is_game_over() {
            return Ok(());
        }
        self.hard_drop()
    }

    pub fn debug_force_milestone(&mut self) -> Result<(), ActionError> {
        if !self.config.debug {
            return Err(ActionError::DebugDisabled);
        }
        self.milestone_shown = true;
        self.events.push(SessionEvent::MilestoneReached);
        Ok(())
    }

    /// Restarts the falling piece from the spawn position when the board was
    /// changed under it and now overlaps it. A blocked spawn tops out.
    fn respawn_if_buried(&mut self, kind: PieceKind) {
        if self
            .falling_piece
            .as_ref()
            .is_some_and(|piece| self.board.is_colliding(piece))
        {
            tracing::debug!(%kind, "falling piece overlapped by the stack, respawning");
            self.enter_piece(kind);
        }
    }

    fn ensure_falling(&self) -> Result<&Piece, ActionError> {
        match (self.state, &self.falling_piece) {
            (SessionState::Falling, Some(piece)) => Ok(piece),
            _ => Err(ActionError::NotFalling),
        }
    }

    fn try_replace_falling_piece(&mut self, piece: Piece) -> Result<(), ActionError> {
        if self.board.is_colliding(&piece) {
            return Err(ActionError::PieceCollision(PieceCollisionError));
        }
        self.falling_piece = Some(piece);
        Ok(())
    }

    fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        if let Some(audio) = &mut self.audio {
            audio.play(cue);
        }
    }

    fn spawn_next(&mut self) {
        let kind = self.queue.dequeue_next();
        self.hold_used = false;
        self.enter_piece(kind);
    }

    fn enter_piece(&mut self, kind: PieceKind) {
        let piece = Piece::spawn(kind);
        self.fall_elapsed = Duration::ZERO;
        if self.board.is_spawn_blocked(&piece) {
            self.top_out(kind);
            return;
        }
        self.events.push(SessionEvent::PieceSpawned(kind));
        self.falling_piece = Some(piece);
        self.state = SessionState::Falling;
    }

    fn step_down(&mut self) {
        let Some(piece) = &self.falling_piece else {
            return;
        };
        let next = piece.down();
        if self.board.is_colliding(&next) {
            self.lock_falling_piece();
        } else {
            self.falling_piece = Some(next);
        }
    }

    fn lock_falling_piece(&mut self) {
        let Some(piece) = self.falling_piece.take() else {
            return;
        };
        self.board.lock(&piece);
        tracing::debug!(kind = %piece.kind(), x = piece.x(), y = piece.y(), "piece locked");
        self.events.push(SessionEvent::PieceLocked(piece.kind()));
        self.play(SoundCue::Lock);

        let rows = self.board.find_full_rows();
        if rows.is_empty() {
            self.stats.complete_piece_drop(0);
            self.spawn_next();
        } else {
            self.line_clear = Some(LineClearPhase::new(rows));
            self.state = SessionState::LineClearing;
        }
    }

    fn finish_line_clear(&mut self) {
        let Some(phase) = self.line_clear.take() else {
            return;
        };
        let cleared = self.board.clear_rows(phase.rows());
        let points = self.stats.complete_piece_drop(cleared);
        if let Some(kind) = ClearKind::from_rows(cleared) {
            tracing::info!(rows = cleared, points, %kind, "lines cleared");
            self.events.push(SessionEvent::LinesCleared {
                rows: cleared,
                points,
                kind,
            });
            if kind.is_tetris() {
                self.play(SoundCue::Tetris);
                if !self.milestone_shown {
                    self.milestone_shown = true;
                    self.events.push(SessionEvent::MilestoneReached);
                }
            } else {
                self.play(SoundCue::LineClear);
            }
        }
        self.spawn_next();
    }

    fn top_out(&mut self, kind: PieceKind) {
        let summary = GameSummary {
            score: self.stats.score(),
            lines: self.stats.total_cleared_lines(),
            level: self.config.level.get(),
        };
        tracing::info!(blocked = %kind, score = summary.score, lines = summary.lines, "game over");
        self.falling_piece = None;
        self.line_clear = None;
        self.state = SessionState::GameOver;
        self.events.push(SessionEvent::ToppedOut);
        self.play(SoundCue::GameOver);

        if self.sacrifice_used
            && let Some(advertisement) = &mut self.advertisement
        {
            advertisement.start();
            self.summary = SummaryGate::AwaitingAdvertisement(summary);
            self.events.push(SessionEvent::AdvertisementStarted);
        } else {
            self.release_summary(summary);
        }
    }

    fn advance_advertisement(&mut self, elapsed: Duration) {
        if let SummaryGate::AwaitingAdvertisement(summary) = self.summary
            && let Some(advertisement) = &mut self.advertisement
        {
            advertisement.advance(elapsed);
            if advertisement.is_finished() {
                self.release_summary(summary);
            }
        }
    }

    fn release_summary(&mut self, summary: GameSummary) {
        tracing::debug!(?summary, "game summary released");
        self.summary = SummaryGate::Released(summary);
        self.events.push(SessionEvent::GameFinished(summary));
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);

    fn session() -> GameSession {
        GameSession::new(SessionConfig {
            seed: Some(SEED),
            ..SessionConfig::default()
        })
    }

    fn debug_session() -> GameSession {
        GameSession::new(SessionConfig {
            debug: true,
            seed: Some(SEED),
            ..SessionConfig::default()
        })
    }

    fn set_falling(session: &mut GameSession, piece: Piece) {
        session.falling_piece = Some(piece);
        session.state = SessionState::Falling;
    }

    /// Stack with column 0 open in the bottom four rows.
    fn prepare_tetris_well(session: &mut GameSession) {
        for y in 16..20 {
            session
                .board
                .lock(&Piece::with_position(PieceKind::I.shape(), 1, y));
            session
                .board
                .lock(&Piece::with_position(PieceKind::I.shape(), 5, y));
        }
        session
            .board
            .lock(&Piece::with_position(PieceKind::I.shape().rotated_cw(), 9, 16));
        set_falling(
            session,
            Piece::with_position(PieceKind::I.shape().rotated_cw(), 0, 0),
        );
    }

    fn block_spawn_area(session: &mut GameSession) {
        session.board.fill_row(0, PieceKind::Z);
        session.board.fill_row(1, PieceKind::Z);
    }

    #[derive(Debug, Clone, Default)]
    struct CueLog(Rc<RefCell<Vec<SoundCue>>>);

    impl AudioSink for CueLog {
        fn play(&mut self, cue: SoundCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    #[derive(Debug, Clone)]
    struct CountdownAd {
        remaining: Rc<RefCell<Option<Duration>>>,
        length: Duration,
    }

    impl CountdownAd {
        fn new(length: Duration) -> Self {
            Self {
                remaining: Rc::default(),
                length,
            }
        }
    }

    impl Advertisement for CountdownAd {
        fn start(&mut self) {
            *self.remaining.borrow_mut() = Some(self.length);
        }

        fn advance(&mut self, elapsed: Duration) {
            if let Some(remaining) = self.remaining.borrow_mut().as_mut() {
                *remaining = remaining.saturating_sub(elapsed);
            }
        }

        fn is_finished(&self) -> bool {
            *self.remaining.borrow() == Some(Duration::ZERO)
        }
    }

    #[test]
    fn test_new_session_has_falling_piece() {
        let mut session = session();
        assert!(session.session_state().is_falling());
        let piece = session.falling_piece().unwrap();
        assert_eq!((piece.x(), piece.y()), (Piece::SPAWN_X, Piece::SPAWN_Y));
        assert!(matches!(
            session.drain_events().as_slice(),
            [SessionEvent::PieceSpawned(_)]
        ));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_gravity_waits_for_drop_interval() {
        let mut session = session();
        session.update(Duration::from_millis(600));
        session.update(Duration::from_millis(400));
        assert_eq!(session.falling_piece().unwrap().y(), 0);
        session.update(Duration::from_millis(1));
        assert_eq!(session.falling_piece().unwrap().y(), 1);
        session.update(Duration::from_millis(1000));
        assert_eq!(session.falling_piece().unwrap().y(), 1);
    }

    #[test]
    fn test_soft_drop_keeps_gravity_timer() {
        let mut session = session();
        session.update(Duration::from_millis(600));
        session.try_soft_drop().unwrap();
        assert_eq!(session.falling_piece().unwrap().y(), 1);
        session.update(Duration::from_millis(401));
        assert_eq!(session.falling_piece().unwrap().y(), 2);
    }

    #[test]
    fn test_higher_level_falls_faster() {
        let mut session = GameSession::new(SessionConfig {
            level: Level::MAX,
            seed: Some(SEED),
            ..SessionConfig::default()
        });
        for _ in 0..3 {
            session.update(Duration::from_millis(101));
        }
        assert_eq!(session.falling_piece().unwrap().y(), 3);
    }

    #[test]
    fn test_gravity_locks_resting_piece() {
        let mut session = session();
        set_falling(
            &mut session,
            Piece::with_position(PieceKind::O.shape(), 4, 18),
        );
        session.update(Duration::from_millis(1001));
        assert_eq!(
            session.board().block_at(4, 19),
            Some(crate::Block::Piece(PieceKind::O))
        );
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.falling_piece().unwrap().y(), 0);
    }

    #[test]
    fn test_moves_revert_on_collision() {
        let mut session = session();
        set_falling(
            &mut session,
            Piece::with_position(PieceKind::O.shape(), 0, 5),
        );
        assert_eq!(
            session.try_move_left(),
            Err(ActionError::PieceCollision(PieceCollisionError))
        );
        assert_eq!(session.falling_piece().unwrap().x(), 0);
        session.try_move_right().unwrap();
        assert_eq!(session.falling_piece().unwrap().x(), 1);
    }

    #[test]
    fn test_rotation_rejected_at_wall() {
        let mut session = session();
        let vertical = Piece::with_position(PieceKind::I.shape().rotated_cw(), 9, 5);
        set_falling(&mut session, vertical.clone());
        assert!(session.try_rotate().is_err());
        assert_eq!(session.falling_piece(), Some(&vertical));

        set_falling(
            &mut session,
            Piece::with_position(PieceKind::I.shape().rotated_cw(), 3, 5),
        );
        session.try_rotate().unwrap();
        assert_eq!(session.falling_piece().unwrap().shape().width(), 4);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut session = session();
        set_falling(
            &mut session,
            Piece::with_position(PieceKind::O.shape(), 0, 17),
        );
        session.try_soft_drop().unwrap();
        assert_eq!(session.falling_piece().unwrap().y(), 18);
        session.try_soft_drop().unwrap();
        assert_eq!(
            session.board().block_at(0, 18),
            Some(crate::Block::Piece(PieceKind::O))
        );
        assert_eq!(session.falling_piece().unwrap().y(), 0);
    }

    #[test]
    fn test_hard_drop_locks_at_ghost() {
        let mut session = session();
        let ghost = session.ghost_piece().unwrap();
        let kind = ghost.kind();
        session.hard_drop().unwrap();
        for (x, y) in ghost.cells() {
            let (x, y) = (usize::try_from(x).unwrap(), usize::try_from(y).unwrap());
            assert_eq!(session.board().block_at(x, y), Some(crate::Block::Piece(kind)));
        }
        assert!(
            session
                .drain_events()
                .contains(&SessionEvent::PieceLocked(kind))
        );
    }

    #[test]
    fn test_single_line_clear_flashes_then_scores() {
        let mut session = session();
        // bottom row open in columns 4..8, where a horizontal I lands
        session
            .board
            .lock(&Piece::with_position(PieceKind::I.shape(), 0, 19));
        session
            .board
            .lock(&Piece::with_position(PieceKind::O.shape(), 8, 18));
        set_falling(&mut session, Piece::spawn(PieceKind::I));

        session.hard_drop().unwrap();
        assert!(session.session_state().is_line_clearing());
        assert_eq!(session.flashing_rows(), [19]);
        assert_eq!(session.try_move_left(), Err(ActionError::NotFalling));
        assert_eq!(session.toggle_pause(), Err(ActionError::NotPlaying));
        assert_eq!(session.stats().score(), 0);

        session.update(Duration::from_millis(100));
        assert!(!session.flashing_rows_visible());
        session.update(Duration::from_millis(450));
        assert!(session.session_state().is_line_clearing());
        session.update(Duration::from_millis(50));
        assert!(session.session_state().is_falling());
        assert!(session.flashing_rows().is_empty());
        assert_eq!(session.stats().score(), 100);
        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert_eq!(session.board().block_at(8, 19), Some(crate::Block::Piece(PieceKind::O)));
        assert_eq!(session.board().block_at(0, 19), Some(crate::Block::Empty));
    }

    #[test]
    fn test_tetris_pays_premium_and_triggers_milestone_once() {
        let cues = CueLog::default();
        let mut session = session().with_audio(Box::new(cues.clone()));
        prepare_tetris_well(&mut session);
        session.hard_drop().unwrap();
        session.update(Duration::from_secs(1));
        assert_eq!(session.stats().score(), 800);
        assert_eq!(session.stats().line_cleared_counter()[4], 1);
        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::LinesCleared {
            rows: 4,
            points: 800,
            kind: ClearKind::Tetris,
        }));
        assert!(events.contains(&SessionEvent::MilestoneReached));
        assert!(cues.0.borrow().contains(&SoundCue::Tetris));

        prepare_tetris_well(&mut session);
        session.hard_drop().unwrap();
        session.update(Duration::from_secs(1));
        assert_eq!(session.stats().score(), 1600);
        assert!(!session.drain_events().contains(&SessionEvent::MilestoneReached));
    }

    #[test]
    fn test_hold_once_per_piece() {
        let mut session = session();
        let first = session.falling_piece().unwrap().kind();
        let upcoming = session.next_pieces(1).next().unwrap();

        session.try_hold().unwrap();
        assert_eq!(session.held_piece(), Some(first));
        assert_eq!(session.falling_piece().unwrap().kind(), upcoming);
        assert_eq!(session.try_hold(), Err(ActionError::HoldAlreadyUsed));
        assert!(!session.can_hold());

        session.hard_drop().unwrap();
        assert!(session.can_hold());
        let current = session.falling_piece().unwrap().kind();
        session.try_hold().unwrap();
        assert_eq!(session.held_piece(), Some(current));
        let piece = session.falling_piece().unwrap();
        assert_eq!(piece.kind(), first);
        assert_eq!((piece.x(), piece.y()), (Piece::SPAWN_X, Piece::SPAWN_Y));
    }

    #[test]
    fn test_hold_into_blocked_spawn_ends_game() {
        let mut session = session();
        session.board.fill_row(0, PieceKind::Z);
        set_falling(
            &mut session,
            Piece::with_position(PieceKind::O.shape(), 0, 10),
        );
        session.try_hold().unwrap();
        assert!(session.session_state().is_game_over());
        assert!(session.falling_piece().is_none());
    }

    #[test]
    fn test_pause_freezes_and_discards_first_frame() {
        let mut session = session();
        session.toggle_pause().unwrap();
        assert!(session.session_state().is_paused());
        session.update(Duration::from_secs(10));
        assert_eq!(session.falling_piece().unwrap().y(), 0);
        assert_eq!(session.try_move_left(), Err(ActionError::NotFalling));
        assert_eq!(session.sacrifice_bottom_rows(), Err(ActionError::NotFalling));

        session.toggle_pause().unwrap();
        session.update(Duration::from_secs(10));
        assert_eq!(session.falling_piece().unwrap().y(), 0);
        session.update(Duration::from_millis(1001));
        assert_eq!(session.falling_piece().unwrap().y(), 1);
    }

    #[test]
    fn test_mute_always_accepted_and_silences_cues() {
        let cues = CueLog::default();
        let mut session = session().with_audio(Box::new(cues.clone()));
        session.toggle_mute();
        assert!(session.is_muted());
        session.hard_drop().unwrap();
        assert!(cues.0.borrow().is_empty());

        session.toggle_mute();
        session.hard_drop().unwrap();
        assert_eq!(*cues.0.borrow(), [SoundCue::Lock]);

        session.toggle_pause().unwrap();
        session.toggle_mute();
        assert!(session.is_muted());
    }

    #[test]
    fn test_sacrifice_once_without_score() {
        let mut session = session();
        for y in 8..20 {
            session.board.fill_row(y, PieceKind::L);
        }
        session.sacrifice_bottom_rows().unwrap();
        assert!(session.sacrifice_used());
        assert_eq!(session.board().find_full_rows(), [18, 19]);
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().total_cleared_lines(), 0);
        assert_eq!(
            session.sacrifice_bottom_rows(),
            Err(ActionError::SacrificeAlreadyUsed)
        );
    }

    #[test]
    fn test_sacrifice_never_buries_falling_piece() {
        let mut session = session();
        // An overhang ten rows above the piece drops onto it.
        session
            .board
            .lock(&Piece::with_position(PieceKind::O.shape(), 4, 2));
        set_falling(
            &mut session,
            Piece::with_position(PieceKind::O.shape(), 4, 13),
        );

        session.sacrifice_bottom_rows().unwrap();

        assert_eq!(
            session.board().block_at(4, 13),
            Some(crate::Block::Piece(PieceKind::O))
        );
        let piece = session.falling_piece().unwrap();
        assert!(!session.board().is_colliding(piece));
        assert_eq!((piece.kind(), piece.y()), (PieceKind::O, Piece::SPAWN_Y));
        assert!(session.session_state().is_falling());
    }

    #[test]
    fn test_sacrifice_requires_falling_piece() {
        let mut session = session();
        session.toggle_pause().unwrap();
        assert_eq!(session.sacrifice_bottom_rows(), Err(ActionError::NotFalling));
        assert!(!session.sacrifice_used());
    }

    #[test]
    fn test_spawn_collision_is_game_over() {
        let mut session = session();
        block_spawn_area(&mut session);
        session.falling_piece = None;
        session.spawn_next();
        assert!(session.session_state().is_game_over());
        assert!(session.falling_piece().is_none());
        assert!(session.ghost_piece().is_none());
        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::ToppedOut));
        assert_eq!(
            session.game_summary(),
            Some(GameSummary {
                score: 0,
                lines: 0,
                level: 1
            })
        );
        assert!(events.iter().any(SessionEvent::is_game_finished));
        assert_eq!(session.hard_drop(), Err(ActionError::NotFalling));
    }

    #[test]
    fn test_advertisement_gates_summary_after_sacrifice() {
        let ad = CountdownAd::new(Duration::from_secs(3));
        let mut session = session().with_advertisement(Box::new(ad.clone()));
        session.sacrifice_bottom_rows().unwrap();
        block_spawn_area(&mut session);
        session.falling_piece = None;
        session.spawn_next();

        assert!(session.session_state().is_game_over());
        assert!(session.is_awaiting_advertisement());
        assert_eq!(*ad.remaining.borrow(), Some(Duration::from_secs(3)));
        assert!(session.drain_events().contains(&SessionEvent::AdvertisementStarted));
        session.update(Duration::from_secs(2));
        assert_eq!(session.game_summary(), None);
        session.update(Duration::from_secs(1));
        assert!(session.game_summary().is_some());
        assert!(session.drain_events().iter().any(SessionEvent::is_game_finished));
    }

    #[test]
    fn test_no_advertisement_without_sacrifice_or_collaborator() {
        let ad = CountdownAd::new(Duration::from_secs(3));
        let mut session = session().with_advertisement(Box::new(ad.clone()));
        block_spawn_area(&mut session);
        session.falling_piece = None;
        session.spawn_next();
        assert!(session.game_summary().is_some());
        assert_eq!(*ad.remaining.borrow(), None);

        let mut session = self::session();
        session.sacrifice_bottom_rows().unwrap();
        block_spawn_area(&mut session);
        session.falling_piece = None;
        session.spawn_next();
        assert!(session.game_summary().is_some());
    }

    #[test]
    fn test_restart_resets_everything_but_mute() {
        let mut session = session();
        prepare_tetris_well(&mut session);
        session.hard_drop().unwrap();
        session.update(Duration::from_secs(1));
        session.sacrifice_bottom_rows().unwrap();
        session.toggle_mute();
        block_spawn_area(&mut session);
        session.falling_piece = None;
        session.spawn_next();
        assert!(session.session_state().is_game_over());

        session.restart();
        assert!(session.session_state().is_falling());
        assert!(session.board().is_empty());
        assert_eq!(session.stats().score(), 0);
        assert!(!session.sacrifice_used());
        assert!(session.game_summary().is_none());
        assert!(session.held_piece().is_none());
        assert!(session.is_muted());
        assert_eq!(
            session.falling_piece().unwrap().kind(),
            PieceQueue::with_seed(SEED).dequeue_next()
        );
    }

    #[test]
    fn test_debug_actions_require_debug_mode() {
        let mut session = session();
        assert_eq!(session.debug_force_tetris(), Err(ActionError::DebugDisabled));
        assert_eq!(
            session.debug_force_milestone(),
            Err(ActionError::DebugDisabled)
        );
    }

    #[test]
    fn test_debug_force_tetris() {
        let mut session = debug_session();
        session.debug_force_tetris().unwrap();
        assert!(session.session_state().is_line_clearing());
        assert_eq!(session.flashing_rows(), [16, 17, 18, 19]);
        session.update(Duration::from_secs(1));
        assert_eq!(session.stats().score(), 800);
        assert_eq!(session.stats().total_cleared_lines(), 4);
        assert!(session.drain_events().contains(&SessionEvent::MilestoneReached));
    }

    #[test]
    fn test_debug_force_milestone() {
        let mut session = debug_session();
        session.drain_events();
        session.debug_force_milestone().unwrap();
        assert_eq!(session.drain_events(), [SessionEvent::MilestoneReached]);
    }
}
