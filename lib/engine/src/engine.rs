/* 文本协议：按行读取命令，驱动对局并输出应答 */
use std::{
    io::{self, BufRead, Write},
    sync::LazyLock,
};

use common::{Position, Side};
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    constant::ENGINE_NAME,
    game::{GameConfig, Janggi},
    render::render,
};

const SQUARE: &str = r"[a-i](?:10|[1-9])";

static POSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^startpos(?: moves (?P<moves>{SQUARE}{SQUARE}(?: {SQUARE}{SQUARE})*))?$"
    ))
    .expect("position pattern")
});
static MOVE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(?P<from>{SQUARE})(?P<to>{SQUARE})$")).expect("move pattern"));
static MOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<from>\S+)\s+(?P<to>\S+)$").expect("move command pattern"));
static SETOPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^free_movement\s+(?P<value>true|false)$").expect("setoption pattern")
});

pub struct JanggiEngine {
    pub game: Janggi,
    config: GameConfig,
    running: bool,
}

impl JanggiEngine {
    pub fn new(config: GameConfig) -> Self {
        JanggiEngine {
            game: Janggi::new(config),
            config,
            running: true,
        }
    }

    pub fn start<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let cmd = line.trim();
            if cmd.is_empty() {
                continue;
            }
            for reply in self.execute(cmd) {
                writeln!(output, "{}", reply)?;
            }
            output.flush()?;
            if !self.running {
                break;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, cmd: &str) -> Vec<String> {
        debug!(cmd, "command");
        let mut token = cmd.splitn(2, ' ');
        let name = token.next().unwrap_or_default();
        let param = token.next().unwrap_or_default().trim();
        match name {
            "janggi" => self.info(),
            "isready" => vec!["readyok".to_owned()],
            "position" => self.position(param),
            "move" => self.play(param),
            "status" => vec![self.game.state().to_string()],
            "turn" => vec![self.game.turn().name().to_owned()],
            "check" => self.check(param),
            "legal" => self.legal(param),
            "board" => render(&self.game).lines().map(str::to_owned).collect(),
            "setoption" => self.set_option(param),
            "quit" => {
                self.running = false;
                vec!["bye".to_owned()]
            }
            _ => vec!["not support".to_owned()],
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn info(&self) -> Vec<String> {
        vec![
            format!("id name {}", ENGINE_NAME),
            format!(
                "option free_movement type check default {}",
                self.config.free_movement
            ),
            "janggiok".to_owned(),
        ]
    }

    // position startpos [moves a7a6 a4a5 ...]
    // 遇到第一步非法走子即停止，应答已接受的步数
    fn position(&mut self, param: &str) -> Vec<String> {
        let Some(captures) = POSITION_RE.captures(param) else {
            return vec!["not support".to_owned()];
        };
        self.game = Janggi::new(self.config);

        let mut accepted = 0;
        if let Some(moves) = captures.name("moves") {
            for m in moves.as_str().split(' ') {
                let Some(parts) = MOVE_TOKEN_RE.captures(m) else {
                    break;
                };
                if !self.game.submit_move(&parts["from"], &parts["to"]) {
                    warn!(m, "position stopped at rejected move");
                    break;
                }
                accepted += 1;
            }
        }
        vec![format!("ok {}", accepted)]
    }

    fn play(&mut self, param: &str) -> Vec<String> {
        let accepted = match MOVE_RE.captures(param) {
            Some(parts) => self.game.submit_move(&parts["from"], &parts["to"]),
            None => false,
        };
        vec![if accepted { "accepted" } else { "rejected" }.to_owned()]
    }

    fn check(&self, param: &str) -> Vec<String> {
        let side = match param {
            "blue" => Side::Blue,
            "red" => Side::Red,
            _ => return vec!["not support".to_owned()],
        };
        vec![self.game.is_in_check(side).to_string()]
    }

    fn legal(&self, param: &str) -> Vec<String> {
        let targets: Vec<String> = param
            .parse::<Position>()
            .map(|pos| self.game.legal_destinations(pos).iter().map(Position::to_string).collect())
            .unwrap_or_default();
        if targets.is_empty() {
            vec!["none".to_owned()]
        } else {
            vec![targets.join(" ")]
        }
    }

    fn set_option(&mut self, param: &str) -> Vec<String> {
        let Some(captures) = SETOPTION_RE.captures(param) else {
            return vec!["not support".to_owned()];
        };
        let enabled = &captures["value"] == "true";
        self.config.free_movement = enabled;
        self.game.set_free_movement(enabled);
        vec!["ok".to_owned()]
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::JanggiEngine;
    use crate::game::GameConfig;

    #[test]
    fn test_info() {
        let mut engine = JanggiEngine::new(GameConfig::default());
        let replies = engine.execute("janggi");
        assert_eq!(replies.last().unwrap(), "janggiok");
        assert_eq!(engine.execute("isready"), vec!["readyok"]);
        assert_eq!(engine.execute("ucci"), vec!["not support"]);
    }

    #[test]
    fn test_position() {
        let mut engine = JanggiEngine::new(GameConfig::default());
        assert_eq!(engine.execute("position startpos moves a7a6 a4a5 a10a7"), vec!["ok 3"]);
        assert_eq!(engine.execute("turn"), vec!["red"]);
        // 第二步非法，之后的走子不再执行
        assert_eq!(engine.execute("position startpos moves a7a6 a6a5 a4a5"), vec!["ok 1"]);
        assert_eq!(engine.execute("turn"), vec!["red"]);
        assert_eq!(engine.execute("position fen 9/9"), vec!["not support"]);
    }

    #[test]
    fn test_move_and_queries() {
        let mut engine = JanggiEngine::new(GameConfig::default());
        assert_eq!(engine.execute("move a7 a6"), vec!["accepted"]);
        assert_eq!(engine.execute("move a7 a6"), vec!["rejected"]);
        assert_eq!(engine.execute("move nowhere"), vec!["rejected"]);
        assert_eq!(engine.execute("status"), vec!["UNFINISHED"]);
        assert_eq!(engine.execute("check blue"), vec!["false"]);
        assert_eq!(engine.execute("check green"), vec!["not support"]);
        assert_eq!(engine.execute("legal a4"), vec!["a4 a5 b4"]);
        assert_eq!(engine.execute("legal e5"), vec!["none"]);
        assert_eq!(engine.execute("board").len(), 14);
    }

    #[test]
    fn test_setoption() {
        let mut engine = JanggiEngine::new(GameConfig::default());
        assert_eq!(engine.execute("setoption free_movement true"), vec!["ok"]);
        assert_eq!(engine.execute("move a4 a5"), vec!["accepted"]);
        assert_eq!(engine.execute("setoption free_movement maybe"), vec!["not support"]);
    }

    #[test]
    fn test_start_loop() {
        let mut engine = JanggiEngine::new(GameConfig::default());
        let input = "isready\n\nmove a7 a6\nquit\nstatus\n";
        let mut output = Vec::new();
        engine.start(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "readyok\naccepted\nbye\n");
        assert!(!engine.is_running());
    }
}
