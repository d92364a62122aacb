//! myFlix - A movie catalog client

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use myflix::{
    api::ApiClient,
    config::Config,
    models::{LoginDetails, RegistrationDetails},
    session::{Route, SessionStore},
    storage::create_storage,
    views::{AppNav, LoginForm, MoviesListView, ProfileView, RegistrationForm, ViewResult},
};

/// myFlix command line client
#[derive(Parser, Debug)]
#[command(name = "myflix", version, about = "Browse movies and manage favorites")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "myflix.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new account.
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        email: String,
        /// Birthday as YYYY-MM-DD.
        #[arg(short, long)]
        birthday: String,
    },

    /// Log in and cache the session.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the cached session.
    Logout,

    /// Show who is logged in.
    Status,

    /// List all movies.
    Movies,

    /// List favorited movies.
    Favorites,

    /// Show one movie.
    Movie { id: String },

    /// Add or remove a movie from favorites.
    Toggle { id: String },

    /// Show the profile.
    Profile,

    /// Edit the profile; omitted fields keep their current value.
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Birthday as YYYY-MM-DD.
        #[arg(long)]
        birthday: Option<String>,
    },

    /// Delete the account and log out.
    Deregister,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "myflix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_env(&cli.config)?;
    tracing::debug!("Configuration loaded from {}", cli.config.display());

    let storage = create_storage(&config.storage)?;
    tracing::debug!("Session storage ready: {:?}", config.storage.driver);

    let session = Arc::new(SessionStore::new(storage));
    let client = ApiClient::from_config(&config.api, session.clone())?;
    let nav = AppNav::new(session.clone());

    match cli.command {
        Command::Register {
            username,
            password,
            email,
            birthday,
        } => {
            let form = RegistrationForm::new(RegistrationDetails {
                username,
                password,
                email,
                birthday,
            });
            announce(form.submit(&client).await)?;
        }
        Command::Login { username, password } => {
            let form = LoginForm::new(LoginDetails::new(username, password));
            announce(form.submit(&client).await)?;
        }
        Command::Logout => {
            report(nav.logout())?;
            println!("Logged out");
        }
        Command::Status => match session.live_user() {
            Some(user) => {
                println!("Logged in as {} ({})", user.username, user.email);
                println!("{} favorite movie(s)", user.favourite_movies.len());
            }
            None => println!("Not logged in"),
        },
        Command::Movies => {
            ensure_route(&nav, Route::Movies)?;
            let mut view = MoviesListView::new(client);
            report(view.load().await)?;
            for movie in view.movies() {
                let mark = if view.is_favourite_movie(&movie.id) { "*" } else { " " };
                println!("{} {}  {}", mark, movie.id, movie.title);
            }
        }
        Command::Favorites => {
            ensure_route(&nav, Route::Movies)?;
            let mut view = MoviesListView::new(client);
            report(view.load().await)?;
            let favourites = view.favourite_movies();
            if favourites.is_empty() {
                println!("No favorite movies yet");
            }
            for movie in favourites {
                println!("{}  {}", movie.id, movie.title);
            }
        }
        Command::Movie { id } => {
            ensure_route(&nav, Route::Movies)?;
            let view = MoviesListView::new(client);
            let movie = report(view.fetch_movie(&id).await)?;
            println!("{}", movie.title);
            println!("Genre: {}", movie.genre.name);
            println!("Director: {}", movie.director.name);
            println!();
            println!("{}", movie.description);
        }
        Command::Toggle { id } => {
            ensure_route(&nav, Route::Movies)?;
            let view = MoviesListView::new(client);
            let state = report(view.toggle_favourite(&id).await)?;
            if state.is_favorited() {
                println!("{} added to favorites", id);
            } else {
                println!("{} removed from favorites", id);
            }
        }
        Command::Profile => {
            ensure_route(&nav, Route::Profile)?;
            let view = ProfileView::new(client);
            let form = view.form();
            println!("Username: {}", form.username);
            println!("Email:    {}", form.email);
            println!("Birthday: {}", form.birthday);
        }
        Command::Update {
            username,
            email,
            birthday,
        } => {
            ensure_route(&nav, Route::Profile)?;
            let mut view = ProfileView::new(client);
            let form = view.form_mut();
            if let Some(username) = username {
                form.username = username;
            }
            if let Some(email) = email {
                form.email = email;
            }
            if let Some(birthday) = birthday {
                form.birthday = birthday;
            }
            announce(view.update().await)?;
        }
        Command::Deregister => {
            ensure_route(&nav, Route::Profile)?;
            let mut view = ProfileView::new(client);
            announce(view.deregister().await)?;
        }
    }

    Ok(())
}

/// Print a success notice, or turn an error notice into a failed exit
fn announce(result: ViewResult) -> Result<()> {
    let notice = report(result)?;
    println!("{}", notice);
    Ok(())
}

fn report<T>(result: ViewResult<T>) -> Result<T> {
    result.map_err(|notice| anyhow::anyhow!("{}", notice))
}

fn ensure_route(nav: &AppNav, route: Route) -> Result<()> {
    if nav.open(route) != route {
        bail!("Please log in first.");
    }
    Ok(())
}
