use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::{env, fs, path::Path, process};

mod runner;

/// Sub-commands of the `migration` binary. No argument means `up`.
enum Command {
    Up,
    Fresh,
    Clean,
    Status,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg {
            None | Some("up") => Some(Self::Up),
            Some("fresh") => Some(Self::Fresh),
            Some("clean") => Some(Self::Clean),
            Some("status") => Some(Self::Status),
            Some(_) => None,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "data/lms.db".into());
    let url = format!("sqlite://{db_path}?mode=rwc");
    let arg = env::args().nth(1);

    let Some(command) = Command::parse(arg.as_deref()) else {
        eprintln!("usage: migration [up|fresh|clean|status]");
        process::exit(2);
    };

    match command {
        Command::Clean => remove_db_file(&db_path),
        Command::Fresh => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
        Command::Up => {
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
        Command::Status => {
            let db = runner::connect(&url).await;
            if let Err(e) = Migrator::status(&db).await {
                eprintln!("Failed to read migration status: {e}");
                process::exit(1);
            }
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("Nothing to clean at {}", db_path.display());
        return;
    }
    if let Err(e) = fs::remove_file(db_path) {
        eprintln!("Could not delete {}: {e}", db_path.display());
        process::exit(1);
    }
    println!("Removed {}", db_path.display());
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Could not create {}: {e}", parent.display());
            process::exit(1);
        }
    }
}
