use anyhow::{Context, Result};
use bataille_core::{
    Event, EventBus, Game, GameConfig, GamePhase, PlayerId, RngState, Seat, DEFAULT_DECK_SIZE,
};
use bataille_store::{
    default_store_dir, GameStore, GamesFile, LoadState, PlayerStore, PlayersFile, RetryPolicy,
    ScoreEntry,
};
use std::io::{self, Write};
use std::path::PathBuf;

type Roster = PlayerStore<PlayersFile>;
type History = GameStore<GamesFile>;

#[derive(Debug, Clone)]
struct CliOptions {
    dir: Option<PathBuf>,
    seed: Option<u64>,
    deck_size: u32,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        dir: None,
        seed: None,
        deck_size: DEFAULT_DECK_SIZE,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dir" => options.dir = iter.next().map(PathBuf::from),
            "--seed" => options.seed = iter.next().and_then(|value| value.parse().ok()),
            "--deck-size" => {
                if let Some(value) = iter.next().and_then(|value| value.parse().ok()) {
                    options.deck_size = value;
                }
            }
            other => eprintln!("ignoring unknown option: {other}"),
        }
    }
    options
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if let Err(err) = run(options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: CliOptions) -> Result<()> {
    let dir = options
        .dir
        .clone()
        .or_else(default_store_dir)
        .context("no store directory; pass --dir or set BATAILLE_DIR")?;
    let mut roster = PlayerStore::new(PlayersFile::new(&dir), RetryPolicy::default());
    let mut history = GameStore::new(GamesFile::new(&dir), RetryPolicy::default());
    roster.load();
    history.load();
    report_load(&roster, &history);

    let config = GameConfig::with_deck_size(options.deck_size);
    let mut rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    let mut events = EventBus::default();
    let mut game = Game::new(config, &mut rng, &mut events)?;
    print_events(&game, &roster, &mut events);
    println!("pick two players to start; type 'help' for commands");

    loop {
        let Some(line) = read_line("> ") else {
            // Stdin is gone, nobody left to ask.
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        match cmd {
            "help" | "h" | "?" => print_help(),
            "players" => print_players(&roster, &game),
            "games" | "history" => print_games(&history, &roster),
            "pick" => {
                pick(&mut game, &args, &mut events);
                print_events(&game, &roster, &mut events);
            }
            "play" | "p" => {
                play(&mut game, &roster, &args, &mut events);
                print_events(&game, &roster, &mut events);
            }
            "board" | "b" | "state" => print_board(&game, &roster),
            "save" => save_game(&mut game, &mut history, &roster),
            "new" => {
                game = Game::new(config, &mut rng, &mut events)?;
                print_events(&game, &roster, &mut events);
                println!("fresh board, pick two players");
            }
            "quit" | "exit" | "q" => {
                if can_leave(&game) {
                    break;
                }
            }
            other => println!("unknown command: {other} (try 'help')"),
        }
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  players          list the roster and current picks");
    println!("  games            list saved games, most recent first");
    println!("  pick <1|2> <id>  seat a roster player ('none' to unseat)");
    println!("  play <1|2>       reveal the seat's top card");
    println!("  board            show the table");
    println!("  save             record the result");
    println!("  new              deal a fresh board");
    println!("  quit             leave (asks first while a game is running)");
}

fn report_load(roster: &Roster, history: &History) {
    if roster.state() == LoadState::Failed {
        println!(
            "players could not be loaded: {}",
            roster.error().unwrap_or("unknown error")
        );
    } else {
        println!("{} players known", roster.players().len());
    }
    match history.combined_state(roster.state()) {
        LoadState::Failed => println!(
            "game history could not be loaded: {}",
            history.error().unwrap_or("unknown error")
        ),
        LoadState::Loaded => println!("{} games on record", history.games().len()),
        _ => {}
    }
}

fn parse_seat(arg: Option<&&str>) -> Option<Seat> {
    match arg.copied() {
        Some("1") => Some(Seat::First),
        Some("2") => Some(Seat::Second),
        _ => None,
    }
}

fn pick(game: &mut Game, args: &[&str], events: &mut EventBus) {
    let Some(seat) = parse_seat(args.first()) else {
        println!("usage: pick <1|2> <player id|none>");
        return;
    };
    match args.get(1).copied() {
        Some("none") => game.assign_player(seat, None, events),
        Some(raw) => match raw.parse::<PlayerId>() {
            Ok(id) => game.assign_player(seat, Some(id), events),
            // Malformed ids are dropped, not errors.
            Err(_) => log::debug!("ignoring malformed player id {raw:?}"),
        },
        None => println!("usage: pick <1|2> <player id|none>"),
    }
}

fn play(game: &mut Game, roster: &Roster, args: &[&str], events: &mut EventBus) {
    let Some(seat) = parse_seat(args.first()) else {
        println!("usage: play <1|2>");
        return;
    };
    if !game.player(seat).can_act() {
        if game.player(seat).has_cards() {
            println!("{} must wait for the opponent", seat_label(game, roster, seat));
        } else {
            println!("{} has no cards left", seat_label(game, roster, seat));
        }
        return;
    }
    game.reveal(seat, events);
    if let Some(card) = game.player(seat).revealed() {
        println!("{} reveals {card}", seat_label(game, roster, seat));
    }
    if game.phase() == GamePhase::Over {
        print_final(game, roster);
    }
}

fn save_game(game: &mut Game, history: &mut History, roster: &Roster) {
    match game.phase() {
        GamePhase::Saved => {
            println!("already saved");
            return;
        }
        GamePhase::PlayerSelection => {
            println!("pick both players before saving");
            return;
        }
        _ => {}
    }
    let scores: Vec<ScoreEntry> = Seat::ALL
        .into_iter()
        .map(|seat| ScoreEntry {
            player_id: game.player(seat).id().unwrap_or(0),
            score: game.score(seat),
        })
        .collect();
    match history.save(scores) {
        Ok(record) => {
            game.mark_saved();
            println!("saved game #{}", record.id);
            println!("type 'new' to deal again or 'quit' to leave");
        }
        Err(err) => println!("save failed: {err}; the game stays open, try again"),
    }
}

fn can_leave(game: &Game) -> bool {
    match game.phase() {
        GamePhase::PlayerSelection | GamePhase::Saved => true,
        _ => confirm("leave the running game? unsaved scores are lost [y/N] "),
    }
}

fn seat_label(game: &Game, roster: &Roster, seat: Seat) -> String {
    let number = match seat {
        Seat::First => 1,
        Seat::Second => 2,
    };
    match game.player(seat).id().and_then(|id| roster.name_of(id)) {
        Some(name) => format!("seat {number} ({name})"),
        None => format!("seat {number}"),
    }
}

fn print_players(roster: &Roster, game: &Game) {
    if roster.state() == LoadState::Failed {
        println!(
            "players unavailable: {}",
            roster.error().unwrap_or("unknown error")
        );
        return;
    }
    for player in roster.players() {
        let seat_mark = Seat::ALL
            .into_iter()
            .find(|seat| game.player(*seat).id() == Some(player.id))
            .map(|seat| match seat {
                Seat::First => "  [seat 1]",
                Seat::Second => "  [seat 2]",
            })
            .unwrap_or("");
        println!("  {:>3}  {}{}", player.id, player.name, seat_mark);
    }
}

fn print_games(history: &History, roster: &Roster) {
    match history.combined_state(roster.state()) {
        LoadState::Failed => {
            println!(
                "history unavailable: {}",
                history.error().unwrap_or("unknown error")
            );
            return;
        }
        LoadState::Loaded => {}
        _ => {
            println!("history still loading");
            return;
        }
    }
    let summaries = history.summaries(roster);
    if summaries.is_empty() {
        println!("no games on record yet");
        return;
    }
    for summary in summaries {
        let line = summary
            .scores
            .iter()
            .map(|score| {
                let name = if score.player_name.is_empty() {
                    format!("#{}", score.player_id)
                } else {
                    score.player_name.clone()
                };
                let mark = if score.winner { "*" } else { "" };
                format!("{name} {}{mark}", score.score)
            })
            .collect::<Vec<_>>()
            .join("  vs  ");
        println!("  game {:>3}: {line}", summary.id);
    }
}

fn print_board(game: &Game, roster: &Roster) {
    for seat in Seat::ALL {
        let player = game.player(seat);
        let revealed = match player.revealed() {
            Some(card) => card.to_string(),
            None => "-".to_string(),
        };
        let status = if player.can_act() { "ready" } else { "waiting" };
        println!(
            "  {}: {} cards in hand, showing {}, score {}, {}",
            seat_label(game, roster, seat),
            player.hand().len(),
            revealed,
            game.score(seat),
            status
        );
    }
    println!("  rounds played: {}", game.ledger().len());
    let phase = match game.phase() {
        GamePhase::PlayerSelection => "picking players",
        GamePhase::OnGoing => "game on",
        GamePhase::Over => "game over",
        GamePhase::Saved => "saved",
    };
    println!("  phase: {phase}");
    if game.phase() == GamePhase::Over {
        print_final(game, roster);
    }
}

fn print_final(game: &Game, roster: &Roster) {
    println!(
        "  final score: {} {} - {} {}",
        seat_label(game, roster, Seat::First),
        game.score(Seat::First),
        game.score(Seat::Second),
        seat_label(game, roster, Seat::Second),
    );
    match game.winner() {
        Some(seat) => println!("  {} wins the game", seat_label(game, roster, seat)),
        None => println!("  the game is a draw"),
    }
    if !game.saved() {
        println!("  type 'save' to record the result");
    }
}

fn print_events(game: &Game, roster: &Roster, events: &mut EventBus) {
    let drained: Vec<Event> = events.drain().collect();
    for event in drained {
        match event {
            Event::HandsDealt { each } => {
                println!("dealt {each} cards to each seat");
            }
            Event::RoundCompleted { plays } => {
                let [first, second] = plays;
                let outcome = if first.card > second.card {
                    format!("{} takes the round", name_or_id(roster, first.player))
                } else if second.card > first.card {
                    format!("{} takes the round", name_or_id(roster, second.player))
                } else {
                    "the round is tied".to_string()
                };
                println!(
                    "round {}: {} vs {} - {}",
                    game.ledger().len(),
                    first.card,
                    second.card,
                    outcome
                );
            }
            Event::RevealCleared { seat } => {
                println!(
                    "{} takes back the old card and must reveal a new one",
                    seat_label(game, roster, seat)
                );
            }
        }
    }
}

fn name_or_id(roster: &Roster, id: PlayerId) -> String {
    match roster.name_of(id) {
        Some(name) => name.to_string(),
        None => format!("player {id}"),
    }
}

fn confirm(prompt: &str) -> bool {
    let Some(line) = read_line(prompt) else {
        return false;
    };
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line)
}
