use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use sweeper::{
    ActionOutcome, BoardObserver, Difficulty, Game, GameConfig, GameError, MineLayer, Position,
    RandomLayer, RoundOutcome, TileStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
        }
    }
}

/// Play mine sweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Board preset, overridden field by field by the flags below
    #[arg(short, long, value_enum, default_value_t = Level::Beginner)]
    difficulty: Level,

    #[arg(long)]
    rows: Option<u32>,

    #[arg(long)]
    columns: Option<u32>,

    #[arg(long)]
    mines: Option<u32>,

    /// Seed for mine placement, for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let preset = GameConfig::from(Difficulty::from(self.difficulty));
        GameConfig::new(
            self.rows.unwrap_or(preset.rows),
            self.columns.unwrap_or(preset.columns),
            self.mines.unwrap_or(preset.mines),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Reveal,
    Flag,
}

enum Input {
    Move(Position, Action),
    Invalid,
    Quit,
}

/// Terminal rendering of the board, kept current by the engine.
struct Screen {
    rows: u32,
    columns: u32,
    tiles: Vec<TileStatus>,
}

impl Screen {
    fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            tiles: vec![TileStatus::Unflipped; (rows * columns) as usize],
        }
    }

    fn print(&self) {
        // Print column numbers
        print!("   ");
        for col in 0..self.columns {
            print!("{:>2}", col % 100);
        }
        println!();

        for row in 0..self.rows {
            print!("{:>2} ", row);
            for col in 0..self.columns {
                let symbol = match self.tiles[(row * self.columns + col) as usize] {
                    TileStatus::Unflipped => "□".to_string(),
                    TileStatus::Flipped => " ".to_string(),
                    TileStatus::Flagged => "⚑".to_string(),
                    TileStatus::Warning(n) => n.to_string(),
                    TileStatus::Mine => "✹".to_string(),
                };
                print!("{:>2}", symbol);
            }
            println!();
        }
    }
}

impl BoardObserver for Screen {
    fn on_cell_status(&mut self, pos: Position, status: TileStatus) {
        let index = pos.row as usize * self.columns as usize + pos.col as usize;
        if let Some(tile) = self.tiles.get_mut(index) {
            *tile = status;
        }
    }

    fn on_round_ended(&mut self, outcome: RoundOutcome) {
        self.print();
        match outcome {
            RoundOutcome::Won => println!("You won! The minefield is clear."),
            RoundOutcome::Lost => println!("Oops! You stepped on a mine. Game over."),
        }
        println!("Starting a new round.\n");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run_game(&cli) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game(cli: &Cli) -> Result<(), GameError> {
    let config = cli.config();
    config.validate()?;
    let layer = match cli.seed {
        Some(seed) => RandomLayer::seeded(seed),
        None => RandomLayer::from_entropy(),
    };
    let mut game = Game::new(config, layer, Screen::new(config.rows, config.columns))?;

    for row in 0..config.rows as i32 {
        for col in 0..config.columns as i32 {
            game.register_cell(Position::new(row, col))?;
        }
    }
    game.lay_mines()?;

    loop {
        game.observer().print();
        println!("Flags left: {}", game.flags_remaining());

        let (pos, action) = match get_user_input(&game) {
            Input::Move(pos, action) => (pos, action),
            Input::Invalid => continue,
            Input::Quit => return Ok(()),
        };

        let result = match action {
            Action::Reveal => game.reveal(pos),
            Action::Flag => game.toggle_flag(pos),
        };
        match result {
            Ok(ActionOutcome::RoundEnded(_)) | Ok(ActionOutcome::Changed) => {}
            Ok(ActionOutcome::Unchanged) => println!("Nothing to do there."),
            Err(GameError::NoFlagsAvailable) => println!(
                "There are no flags left! To place a flag here, you must remove another flag first."
            ),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn get_user_input<L: MineLayer, O: BoardObserver>(game: &Game<L, O>) -> Input {
    print!("Enter command (row col [r/f]) or q to quit: ");
    io::stdout().flush().ok();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => return Input::Quit,
        Ok(_) => {}
    }

    let mut parts = input.split_whitespace();
    let first = match parts.next() {
        Some("q") => return Input::Quit,
        Some(first) => first,
        None => return Input::Invalid,
    };

    let (Ok(row), Some(Ok(col)), Some(action)) = (
        first.parse::<i32>(),
        parts.next().map(str::parse::<i32>),
        parts.next().and_then(|a| a.chars().next()),
    ) else {
        println!("Expected: row col r|f");
        return Input::Invalid;
    };

    let pos = Position::new(row, col);
    if game.cell(pos).is_err() {
        println!("Position out of bounds");
        return Input::Invalid;
    }

    match action {
        'r' => Input::Move(pos, Action::Reveal),
        'f' => Input::Move(pos, Action::Flag),
        _ => {
            println!("Invalid action. Use 'r' to reveal or 'f' to flag");
            Input::Invalid
        }
    }
}
