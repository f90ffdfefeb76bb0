//! Command handlers - one per subcommand.
//!
//! All user-facing messaging and field validation lives here; the store only
//! enforces plate uniqueness and reports affected counts.

use std::path::{Path, PathBuf};

use motorpool::ui::{self, Icons};
use motorpool::{Error, NewVehicle, VehicleStore, config, search};

use crate::{OutputMode, emit_success};

/// Resolve the database path: CLI flag, then config file, then the default
/// location under the current directory.
pub fn resolve_database(cli_database: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_database {
        return Ok(path);
    }
    if let Some(cfg) = config::load_config(None)? {
        if let Some(db) = cfg.database {
            return Ok(PathBuf::from(db));
        }
    }
    Ok(config::default_database_path_in(Path::new(".")))
}

fn open_store(database: &Path) -> anyhow::Result<VehicleStore> {
    config::ensure_db_dir(database)?;
    Ok(VehicleStore::open(database)?)
}

#[allow(clippy::too_many_arguments)]
pub fn run_add(
    database: &Path,
    owner: String,
    department: String,
    phone: String,
    plate: String,
    model: String,
    photo: Option<String>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let mut record = NewVehicle::new(owner, department, phone, plate, model);
    if let Some(photo) = photo {
        record = record.with_photo(photo);
    }
    // Caller-side validation; the store never sees empty fields
    record.validate()?;

    let store = open_store(database)?;
    let id = match store.insert(&record) {
        Ok(id) => id,
        Err(Error::PlateTaken(plate)) => {
            anyhow::bail!("plate number {} is already registered to another vehicle", plate)
        }
        Err(e) => return Err(e.into()),
    };

    let vehicle = record.into_vehicle(id);
    if output_mode.is_human() {
        ui::success(&format!(
            "Registered vehicle #{}: {}",
            id,
            vehicle.short_description()
        ));
        if let Some(photo) = &vehicle.photo {
            ui::info("photo", photo);
        }
    } else {
        emit_success(output_mode, "add", serde_json::to_value(&vehicle)?)?;
    }
    Ok(())
}

pub fn run_list(database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let vehicles = store.list_all()?;

    if output_mode.is_human() {
        ui::header(&format!("Vehicle Registry ({})", vehicles.len()));
        if vehicles.is_empty() {
            println!("No vehicles registered yet. Add one with `motorpool add`.");
        } else {
            println!("{}", ui::vehicle_table(&vehicles));
        }
    } else {
        emit_success(output_mode, "list", serde_json::to_value(&vehicles)?)?;
    }
    Ok(())
}

pub fn run_search(
    database: &Path,
    query: Option<String>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let store = open_store(database)?;
    // Load once; the filter runs over this snapshot and never re-queries
    let all = store.list_all()?;
    let query = query.unwrap_or_default();
    let matches = search::filter(&all, &query);

    if output_mode.is_human() {
        ui::header(&format!(
            "Search \"{}\" - {} of {} vehicles",
            query,
            matches.len(),
            all.len()
        ));
        if matches.is_empty() {
            println!("No matching vehicles.");
        } else {
            println!("{}", ui::vehicle_table(matches.iter().copied()));
        }
    } else {
        let matched: Vec<_> = matches.into_iter().cloned().collect();
        emit_success(output_mode, "search", serde_json::to_value(&matched)?)?;
    }
    Ok(())
}

pub fn run_show(database: &Path, plate: String, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let found = store.find_by_plate(&plate)?;

    if output_mode.is_human() {
        match &found {
            Some(vehicle) => {
                ui::header(&format!("Vehicle #{} {}", vehicle.id, ui::plate(&vehicle.plate)));
                ui::summary_row("owner", &vehicle.owner);
                ui::summary_row("department", &vehicle.department);
                ui::summary_row("phone", &vehicle.phone);
                ui::summary_row("model", &vehicle.model);
                ui::summary_row("photo", vehicle.photo.as_deref().unwrap_or("-"));
            }
            None => ui::warn(&format!("No vehicle registered with plate {}", plate)),
        }
    } else {
        emit_success(
            output_mode,
            "show",
            serde_json::json!({ "plate": plate, "vehicle": found }),
        )?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn run_update(
    database: &Path,
    id: i64,
    owner: Option<String>,
    department: Option<String>,
    phone: Option<String>,
    plate: Option<String>,
    model: Option<String>,
    photo: Option<String>,
    clear_photo: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let store = open_store(database)?;

    // Pre-fill from the current record, like the modify dialog
    let Some(mut vehicle) = store.get(id)? else {
        if output_mode.is_human() {
            ui::warn(&format!("No vehicle with id {} - nothing to update", id));
        } else {
            emit_success(output_mode, "update", serde_json::json!({ "affected": 0 }))?;
        }
        return Ok(());
    };

    if let Some(owner) = owner {
        vehicle.owner = owner;
    }
    if let Some(department) = department {
        vehicle.department = department;
    }
    if let Some(phone) = phone {
        vehicle.phone = phone;
    }
    if let Some(plate) = plate {
        vehicle.plate = plate;
    }
    if let Some(model) = model {
        vehicle.model = model;
    }
    if clear_photo {
        vehicle.photo = None;
    } else if let Some(photo) = photo {
        vehicle.photo = Some(photo);
    }

    vehicle.to_draft().validate()?;

    let affected = match store.update(&vehicle) {
        Ok(affected) => affected,
        Err(Error::PlateTaken(plate)) => {
            anyhow::bail!("plate number {} is already registered to another vehicle", plate)
        }
        Err(e) => return Err(e.into()),
    };

    if output_mode.is_human() {
        if affected == 0 {
            ui::warn(&format!("No vehicle with id {} - nothing to update", id));
        } else {
            ui::success(&format!(
                "{} Updated vehicle #{}: {}",
                Icons::MOD,
                id,
                vehicle.short_description()
            ));
        }
    } else {
        emit_success(
            output_mode,
            "update",
            serde_json::json!({ "affected": affected, "vehicle": vehicle }),
        )?;
    }
    Ok(())
}

pub fn run_delete(database: &Path, id: i64, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let affected = store.delete(id)?;

    if output_mode.is_human() {
        if affected == 0 {
            ui::warn(&format!("No vehicle with id {} - nothing to delete", id));
        } else {
            ui::success(&format!("{} Removed vehicle #{}", Icons::DEL, id));
        }
    } else {
        emit_success(output_mode, "delete", serde_json::json!({ "affected": affected }))?;
    }
    Ok(())
}

pub fn run_stats(database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(database)?;
    let stats = store.stats()?;

    if output_mode.is_human() {
        ui::header("Motorpool Statistics");
        let rows = [
            ("Vehicles", stats.vehicles.to_string()),
            ("Departments", stats.departments.to_string()),
            ("With photo", stats.photos.to_string()),
        ];
        let rows: Vec<(&str, &str)> =
            rows.iter().map(|(l, v)| (*l, v.as_str())).collect();
        println!("{}", ui::stats_table(&rows));
        ui::info("database", &database.display().to_string());
    } else {
        emit_success(
            output_mode,
            "stats",
            serde_json::json!({
                "vehicles": stats.vehicles,
                "departments": stats.departments,
                "photos": stats.photos,
            }),
        )?;
    }
    Ok(())
}

pub fn run_init(
    database: Option<PathBuf>,
    force: bool,
    reset_db: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let db_path =
        database.unwrap_or_else(|| config::default_database_path_in(Path::new(".")));

    let cfg = config::MotorpoolConfig {
        database: Some(db_path.display().to_string()),
    };
    let config_path = config::default_config_path();
    config::write_config(&config_path, &cfg, force)?;

    if reset_db {
        VehicleStore::reset(&db_path)?;
    }

    // Create the database up front so the first add doesn't have to
    config::ensure_db_dir(&db_path)?;
    let store = VehicleStore::open(&db_path)?;
    drop(store);

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", config_path.display()));
        ui::info("database", &db_path.display().to_string());
    } else {
        emit_success(
            output_mode,
            "init",
            serde_json::json!({
                "config": config_path.display().to_string(),
                "database": db_path.display().to_string(),
            }),
        )?;
    }
    Ok(())
}
