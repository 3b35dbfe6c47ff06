use std::path::PathBuf;
use std::sync::Arc;

use cinedesk::catalog::genres::{self, NewGenre};
use cinedesk::catalog::movies::{self, MovieQuery};
use cinedesk::catalog::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, people, users};
use cinedesk::config::{ClientConfig, ConfigError};
use cinedesk::net::client::ResourceClient;
use cinedesk::net::error::{ActionError, ApiError, Locale};
use cinedesk::net::types::{Credentials, Genre, Registration};
use cinedesk::router::guard::Decision;
use cinedesk::router::routes::RouteTable;
use cinedesk::router::{NavigationError, Router};
use cinedesk::state::session::{SessionError, SessionStore};
use cinedesk::state::storage::FileStorage;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("client setup failed: {0}")]
    Client(#[from] ApiError),
    #[error("{0}")]
    Action(#[from] ActionError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("{0}")]
    Navigation(#[from] NavigationError),
    #[error("access to {path} denied; redirected to {target}")]
    Denied { path: String, target: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cinedesk", about = "Movie catalog and admin console client")]
struct Cli {
    #[arg(long, env = "CINEDESK_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "CINEDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, value_enum, ignore_case = true, env = "CINEDESK_LOCALE")]
    locale: Option<LocaleArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LocaleArg {
    En,
    #[value(alias = "zh-cn")]
    Zh,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::En => Locale::En,
            LocaleArg::Zh => Locale::Zh,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CINEDESK_PASSWORD")]
        password: String,
    },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CINEDESK_PASSWORD")]
        password: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: Option<String>,
    },
    Logout,
    Whoami,
    Navigate {
        path: String,
    },
    Routes,
    Users(UsersCommand),
    Movies(MoviesCommand),
    Genres(GenresCommand),
    People(PeopleCommand),
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List(PageArgs),
    Show {
        id: u64,
    },
    Update {
        id: u64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: u64,
    },
}

#[derive(Args, Debug)]
struct MoviesCommand {
    #[command(subcommand)]
    command: MoviesSubcommand,
}

#[derive(Subcommand, Debug)]
enum MoviesSubcommand {
    List {
        #[command(flatten)]
        paging: PageArgs,
        #[arg(long)]
        genre: Option<String>,
    },
    Search {
        query: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    Show {
        id: u64,
    },
}

#[derive(Args, Debug)]
struct GenresCommand {
    #[command(subcommand)]
    command: GenresSubcommand,
}

#[derive(Subcommand, Debug)]
enum GenresSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct PeopleCommand {
    #[command(subcommand)]
    command: PeopleSubcommand,
}

#[derive(Subcommand, Debug)]
enum PeopleSubcommand {
    List(PageArgs),
}

/// Session, router, and client wired around one session store.
struct Desk {
    session: Arc<SessionStore>,
    router: Router,
    api: ResourceClient,
}

impl Desk {
    fn open(config: ClientConfig) -> Result<Self, CliError> {
        let storage = Arc::new(FileStorage::new(config.session_file.clone()));
        let session = Arc::new(SessionStore::bootstrap(storage));
        let router = Router::new(RouteTable::default(), session.clone());
        let api = ResourceClient::new(config, session.clone())?;
        Ok(Self { session, router, api })
    }

    /// Gate a command on the view route it stands in for.
    fn require(&self, path: &str) -> Result<(), CliError> {
        match self.router.check(path).decision {
            Decision::Allow => Ok(()),
            Decision::Redirect(target) => Err(CliError::Denied { path: path.to_owned(), target }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mut desk = Desk::open(config)?;

    match cli.command {
        Command::Login { username, password } => {
            let response = desk.session.login(&desk.api, &Credentials { username, password }).await?;
            print_json(&response.user)
        }
        Command::Register { username, password, email, name } => {
            let registration = Registration { username, password, email, name };
            let user = desk.session.register(&desk.api, &registration).await?;
            print_json(&user)
        }
        Command::Logout => {
            desk.session.logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => match desk.session.current_user() {
            Some(user) => print_json(&user),
            None => {
                println!("anonymous");
                Ok(())
            }
        },
        Command::Navigate { path } => {
            let navigation = desk.router.navigate(&path)?;
            print_json(&serde_json::json!({
                "route": navigation.route.name,
                "path": navigation.route.path,
                "params": navigation.route.params,
                "redirected_from": navigation.redirected_from,
            }))
        }
        Command::Routes => {
            for entry in desk.router.table().entries() {
                let mut flags = Vec::new();
                if entry.requires_auth {
                    flags.push("auth");
                }
                if entry.requires_admin {
                    flags.push("admin");
                }
                println!("{:<16} {:<14} {}", entry.path, entry.name, flags.join(","));
            }
            Ok(())
        }
        Command::Users(users) => run_users(&desk, users).await,
        Command::Movies(movies) => run_movies(&desk, movies).await,
        Command::Genres(genres) => run_genres(&desk, genres).await,
        Command::People(people) => run_people(&desk, people).await,
    }
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = ClientConfig::new(base_url, &config.api_prefix, config.session_file, config.locale);
    }
    if let Some(session_file) = &cli.session_file {
        config.session_file.clone_from(session_file);
    }
    if let Some(locale) = cli.locale {
        config.locale = locale.into();
    }
    Ok(config)
}

async fn run_users(desk: &Desk, users: UsersCommand) -> Result<(), CliError> {
    desk.require("/admin/users")?;
    match users.command {
        UsersSubcommand::List(paging) => {
            print_json(&users::fetch_users(&desk.api, paging.page, paging.page_size).await?)
        }
        UsersSubcommand::Show { id } => print_json(&users::fetch_user(&desk.api, id).await?),
        UsersSubcommand::Update { id, data } => {
            let changes = serde_json::from_str::<Value>(&data)?;
            print_json(&users::update_user(&desk.api, id, &changes).await?)
        }
        UsersSubcommand::Delete { id } => print_json(&users::delete_user(&desk.api, id).await?),
    }
}

async fn run_movies(desk: &Desk, movies: MoviesCommand) -> Result<(), CliError> {
    match movies.command {
        MoviesSubcommand::List { paging, genre } => {
            desk.require("/movies")?;
            let query = MovieQuery { page: paging.page, page_size: paging.page_size, genre };
            print_json(&movies::fetch_movies(&desk.api, &query).await?)
        }
        MoviesSubcommand::Search { query, paging } => {
            desk.require("/movies")?;
            print_json(&movies::search_movies(&desk.api, &query, paging.page, paging.page_size).await?)
        }
        MoviesSubcommand::Show { id } => {
            desk.require(&format!("/movies/{id}"))?;
            print_json(&movies::get_movie(&desk.api, id).await?)
        }
    }
}

async fn run_genres(desk: &Desk, genres: GenresCommand) -> Result<(), CliError> {
    desk.require("/admin/movies")?;
    match genres.command {
        GenresSubcommand::List => print_json(&genres::fetch_genres(&desk.api).await?),
        GenresSubcommand::Show { id } => print_json(&genres::get_genre(&desk.api, id).await?),
        GenresSubcommand::Create { name } => print_json(&genres::add_genre(&desk.api, &NewGenre { name }).await?),
        GenresSubcommand::Update { id, name } => {
            print_json(&genres::update_genre(&desk.api, &Genre { id, name }).await?)
        }
        GenresSubcommand::Delete { id } => {
            genres::delete_genre(&desk.api, id).await?;
            println!("deleted genre {id}");
            Ok(())
        }
    }
}

async fn run_people(desk: &Desk, people: PeopleCommand) -> Result<(), CliError> {
    desk.require("/movies")?;
    match people.command {
        PeopleSubcommand::List(paging) => {
            print_json(&people::fetch_people(&desk.api, paging.page, paging.page_size).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
