use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::game::{Difficulty, GameBoard, GameOutcome};

#[derive(Debug)]
pub enum BoardEvent {
    Attached(UnixStream),
    Detached,
    Active(bool),
    GameOver(GameOutcome),
}

/// Unlinks the board socket when dropped.
#[derive(Debug)]
pub struct SocketGuard {
    path: PathBuf,
}

impl Drop for SocketGuard {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), %err, "failed to remove board socket");
        }
    }
}

/// Only a leftover socket may be replaced; any other file at `path` is an error.
fn clear_stale_socket(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_socket() => fs::remove_file(path)
            .with_context(|| format!("removing stale board socket {}", path.display())),
        Ok(_) => bail!("{} exists and is not a socket", path.display()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("inspecting {}", path.display())),
    }
}

/// Accept board connections one at a time and forward their events in order.
pub fn spawn_socket_listener(path: &Path, tx: mpsc::Sender<BoardEvent>) -> Result<SocketGuard> {
    clear_stale_socket(path)?;
    let listener = UnixListener::bind(path)
        .with_context(|| format!("binding board socket {}", path.display()))?;
    info!(path = %path.display(), "waiting for board connections");
    thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if handle_stream(stream, &tx).is_err() {
                        // receiver gone, window is shutting down
                        break;
                    }
                }
                Err(err) => warn!(%err, "board accept failed"),
            }
        }
    });
    Ok(SocketGuard {
        path: path.to_path_buf(),
    })
}

fn handle_stream(
    stream: UnixStream,
    tx: &mpsc::Sender<BoardEvent>,
) -> Result<(), mpsc::SendError<BoardEvent>> {
    match stream.try_clone() {
        Ok(writer) => tx.send(BoardEvent::Attached(writer))?,
        Err(err) => warn!(%err, "board stream clone failed, events only"),
    }
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let Ok(line) = line else { break };
        match parse_board_line(&line) {
            Some(ev) => tx.send(ev)?,
            None => warn!(line = %line.trim(), "ignoring malformed board line"),
        }
    }
    tx.send(BoardEvent::Detached)
}

pub fn parse_board_line(line: &str) -> Option<BoardEvent> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("ACTIVE ") {
        return parse_flag(rest.trim()).map(BoardEvent::Active);
    }
    if let Some(rest) = line.strip_prefix("OVER ") {
        let mut parts = rest.split_whitespace();
        let won = parse_flag(parts.next()?)?;
        let elapsed_secs: f32 = parts.next()?.parse().ok()?;
        let clicks: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        return Some(BoardEvent::GameOver(GameOutcome {
            won,
            elapsed_secs,
            clicks,
        }));
    }
    None
}

fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// `GameBoard` backed by a board process on the other end of the socket.
pub struct RemoteBoard<W: Write = UnixStream> {
    link: Option<W>,
    active: bool,
    difficulty: Option<Difficulty>,
}

impl<W: Write> RemoteBoard<W> {
    pub fn new() -> Self {
        Self {
            link: None,
            active: false,
            difficulty: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }

    pub fn attach(&mut self, link: W) {
        info!("board attached");
        self.link = Some(link);
    }

    pub fn detach(&mut self) {
        if self.link.take().is_some() {
            info!("board detached");
        }
        self.active = false;
    }

    /// Apply an incoming event. Game-over outcomes are handed back to the caller.
    pub fn apply(&mut self, event: BoardEvent) -> Option<GameOutcome>
    where
        W: From<UnixStream>,
    {
        match event {
            BoardEvent::Attached(stream) => self.attach(W::from(stream)),
            BoardEvent::Detached => self.detach(),
            BoardEvent::Active(active) => self.active = active,
            BoardEvent::GameOver(outcome) => {
                self.active = false;
                return Some(outcome);
            }
        }
        None
    }

    fn send(&mut self, line: &str) {
        let Some(link) = self.link.as_mut() else {
            debug!(command = line, "no board attached, dropping command");
            return;
        };
        if let Err(err) = writeln!(link, "{line}").and_then(|_| link.flush()) {
            warn!(%err, "board write failed, detaching");
            self.detach();
        }
    }
}

impl<W: Write> Default for RemoteBoard<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> GameBoard for RemoteBoard<W> {
    fn is_game_active(&self) -> bool {
        self.active
    }

    fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    fn start_new_game(&mut self, difficulty: Difficulty) {
        self.difficulty = Some(difficulty);
        self.active = true;
        self.send(&format!(
            "START {} {} {}",
            difficulty.width, difficulty.height, difficulty.mine_count
        ));
    }

    fn continue_game(&mut self) {
        self.send("CONTINUE");
    }

    fn pause_game(&mut self) {
        self.send("PAUSE");
    }

    fn restart_game(&mut self) {
        self.active = true;
        self.send("RESTART");
    }

    fn set_player_name(&mut self, name: &str) {
        self.send(&format!("NAME {name}"));
    }

    fn set_draw_options(&mut self, cell_draw_size: u16, use_grid_canvas: bool) {
        self.send(&format!("DRAW {cell_draw_size} {}", u8::from(use_grid_canvas)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_active_and_over_lines() {
        assert!(matches!(parse_board_line("ACTIVE 1"), Some(BoardEvent::Active(true))));
        assert!(matches!(parse_board_line(" ACTIVE 0 \n"), Some(BoardEvent::Active(false))));
        match parse_board_line("OVER 1 50.5 10") {
            Some(BoardEvent::GameOver(o)) => {
                assert!(o.won);
                assert_eq!(o.elapsed_secs, 50.5);
                assert_eq!(o.clicks, 10);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "ACTIVE",
            "ACTIVE yes",
            "OVER 1 50",
            "OVER 2 50 10",
            "OVER 1 fast 10",
            "OVER 1 50 -3",
            "OVER 1 50 10 extra",
            "START 30 16 99",
        ] {
            assert!(parse_board_line(line).is_none(), "accepted {line:?}");
        }
    }

    #[test]
    fn commands_are_written_as_lines() {
        let mut board: RemoteBoard<Vec<u8>> = RemoteBoard::new();
        board.start_new_game(Difficulty::EXPERT);
        assert!(!board.is_attached());

        board.attach(Vec::new());
        board.set_player_name("ace");
        board.set_draw_options(2, true);
        board.start_new_game(Difficulty::EXPERT);
        board.pause_game();
        board.continue_game();
        board.restart_game();
        let sent = String::from_utf8(board.link.take().unwrap()).unwrap();
        assert_eq!(
            sent,
            "NAME ace\nDRAW 2 1\nSTART 30 16 99\nPAUSE\nCONTINUE\nRESTART\n"
        );
        assert_eq!(board.difficulty(), Some(Difficulty::EXPERT));
        assert!(board.is_game_active());
    }

    #[test]
    fn events_update_board_state() {
        let mut board: RemoteBoard = RemoteBoard::new();
        assert!(board.apply(BoardEvent::Active(true)).is_none());
        assert!(board.is_game_active());
        let outcome = GameOutcome {
            won: true,
            elapsed_secs: 12.0,
            clicks: 30,
        };
        assert_eq!(board.apply(BoardEvent::GameOver(outcome)), Some(outcome));
        assert!(!board.is_game_active());
        board.apply(BoardEvent::Active(true));
        board.apply(BoardEvent::Detached);
        assert!(!board.is_game_active());
    }

    #[test]
    fn socket_events_arrive_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.sock");
        let (tx, rx) = mpsc::channel();
        let _socket = spawn_socket_listener(&path, tx).unwrap();

        let mut client = UnixStream::connect(&path).unwrap();
        writeln!(client, "ACTIVE 1").unwrap();
        writeln!(client, "bogus").unwrap();
        writeln!(client, "OVER 1 50 10").unwrap();
        drop(client);

        assert!(matches!(rx.recv().unwrap(), BoardEvent::Attached(_)));
        assert!(matches!(rx.recv().unwrap(), BoardEvent::Active(true)));
        assert!(matches!(rx.recv().unwrap(), BoardEvent::GameOver(_)));
        assert!(matches!(rx.recv().unwrap(), BoardEvent::Detached));
    }

    #[test]
    fn regular_file_at_socket_path_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.sock");
        fs::write(&path, "not a socket").unwrap();
        let (tx, _rx) = mpsc::channel();

        assert!(spawn_socket_listener(&path, tx).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not a socket");
    }

    #[test]
    fn stale_socket_is_replaced_and_unlinked_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.sock");
        drop(UnixListener::bind(&path).unwrap());
        assert!(path.exists());

        let (tx, _rx) = mpsc::channel();
        let socket = spawn_socket_listener(&path, tx).unwrap();
        assert!(UnixStream::connect(&path).is_ok());

        drop(socket);
        assert!(!path.exists());
    }
}
