/// Interactive terminal dashboard for the larva rearing facility.
///
/// One session, one `NavState`. Every iteration of the loop fetches the
/// table fresh (clear-and-refetch — the service never caches across
/// renders), draws the active screen, and applies one command.

use std::io::{self, BufRead, Write};

use larvalog_service::config::{AppConfig, DEFAULT_CONFIG_PATH};
use larvalog_service::dashboard;
use larvalog_service::entry::{self, EntryForm, DATE_FORMAT};
use larvalog_service::history::history_for;
use larvalog_service::logging::{self, Source};
use larvalog_service::model::Species;
use larvalog_service::nav::{self, NavState, Screen};
use larvalog_service::store::{fetch_all_or_empty, RecordStore};
use larvalog_service::units::{find_unit, tank_ids};
use larvalog_service::workflow::{save_record, SaveOutcome};

fn main() {
    dotenv::dotenv().ok();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    logging::init_logger(config.log_level(), config.log.file.as_deref());
    logging::info(
        Source::System,
        Some(&config.store.worksheet),
        &format!("starting in {} mode", config.store.mode),
    );

    let store = config.build_store();
    run_session(store.as_ref(), &config.store.worksheet);
}

/// The session loop. Returns when the operator quits or stdin closes.
fn run_session(store: &dyn RecordStore, worksheet: &str) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = NavState::initial();

    loop {
        // Fresh fetch on every render; a read failure degrades to an
        // empty table and the session keeps running.
        let table = fetch_all_or_empty(store, worksheet);

        match state.screen.clone() {
            Screen::Overview => {
                print!("{}", dashboard::render_overview(state.unit()));
                println!("\nCommands: u1/u2 switch unit, <n> open tank, q quit");
            }
            Screen::TankDetail { tank_id } => {
                let today = chrono::Local::now()
                    .date_naive()
                    .format(DATE_FORMAT)
                    .to_string();
                print!("{}", dashboard::render_detail_header(&tank_id, &today));
                println!();
                print!("{}", dashboard::render_history(&history_for(&table, &tank_id)));
                println!("\nCommands: s save a new record, b back, q quit");
            }
        }

        print!("> ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line.trim().to_lowercase(),
            _ => break, // stdin closed
        };

        match line.as_str() {
            "q" => break,
            "u1" | "u2" => {
                if let Some(unit) = find_unit(&line.to_uppercase()) {
                    state = nav::select_unit(&state, unit);
                }
            }
            "b" => state = nav::go_back(&state),
            "s" => {
                if let Some(tank_id) = state.selected_tank().map(String::from) {
                    let form = prompt_form(&mut lines);
                    let record = entry::submit(&form, &tank_id);
                    match save_record(store, worksheet, &table, record) {
                        SaveOutcome::Saved => {
                            println!("✓ Record saved to worksheet '{}'.", worksheet);
                            state = nav::save_succeeded(&state);
                        }
                        SaveOutcome::Failed(msg) => {
                            // Form values were already consumed from stdin;
                            // the worksheet is untouched, so re-entry is safe.
                            println!("✗ Save failed: {}. Nothing was written — please retry.", msg);
                        }
                    }
                }
            }
            other => {
                if let Ok(n) = other.parse::<usize>() {
                    let ids = tank_ids(state.unit());
                    if n >= 1 && n <= ids.len() {
                        state = nav::select_tank(&state, &ids[n - 1]);
                    } else {
                        println!("No tank {} in {}.", n, state.unit().name);
                    }
                } else if !other.is_empty() {
                    println!("Unknown command '{}'.", other);
                }
            }
        }
        println!();
    }

    logging::info(Source::Ui, None, "session ended");
}

// ---------------------------------------------------------------------------
// Form prompting
// ---------------------------------------------------------------------------

/// Walks the operator through the entry form. Empty input keeps the
/// default shown in the prompt; typos fall back to the default too rather
/// than aborting a half-entered form.
fn prompt_form(lines: &mut impl Iterator<Item = io::Result<String>>) -> EntryForm {
    let mut form = EntryForm::default();

    form.temperature_c = prompt_f64(lines, "Temperature (°C)", form.temperature_c);
    form.ph = prompt_f64(lines, "pH", form.ph);
    form.salinity_ppt = prompt_f64(lines, "Salinity", form.salinity_ppt);
    form.oxygen_mg_l = prompt_f64(lines, "Oxygen", form.oxygen_mg_l);
    form.light_lux = prompt_i64(lines, "Light (lux)", form.light_lux);
    form.species = prompt_species(lines, form.species);
    form.feeding_note = prompt_text(lines, "Feeding note");
    form.observation_note = prompt_text(lines, "Observations");
    form
}

fn prompt_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> String {
    print!("  {}: ", prompt);
    let _ = io::stdout().flush();
    match lines.next() {
        Some(Ok(line)) => line.trim().to_string(),
        _ => String::new(),
    }
}

fn prompt_f64(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
    default: f64,
) -> f64 {
    let input = prompt_line(lines, &format!("{} [{}]", label, default));
    input.parse().unwrap_or(default)
}

fn prompt_i64(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
    default: i64,
) -> i64 {
    let input = prompt_line(lines, &format!("{} [{}]", label, default));
    input.parse().unwrap_or(default)
}

fn prompt_species(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    default: Species,
) -> Species {
    let input = prompt_line(lines, &format!("Species (Seabream/Seabass) [{}]", default));
    Species::parse(&input).unwrap_or(default)
}

fn prompt_text(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> String {
    prompt_line(lines, &format!("{} (optional)", label))
}
