//! Command-line front-end over the resource clients.
//!
//! Each subcommand drives one client verb and prints the resulting state cell
//! as JSON on stdout.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use clubdesk::api::{ListParams, Mutation};
use clubdesk::errors::ClientError;
use clubdesk::models::{
    Credentials, NewActivity, NewAttendanceDay, NewComment, NewEvent, NewGame, NewNews,
    NewTournament, NewUser, UserActivity,
};
use clubdesk::routes::Route;
use clubdesk::state::StateCell;
use clubdesk::Clubdesk;

#[derive(Parser)]
#[command(
    name = "clubdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Administer the club: news, members, activities, attendance, tournaments and events",
    long_about = None
)]
pub struct Cli {
    /// Skip the confirmation prompt on deletes
    #[arg(global = true, long, short = 'y')]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and print the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// News posts
    #[command(subcommand)]
    News(NewsCommand),

    /// Comments on a news post
    #[command(subcommand)]
    Comments(CommentsCommand),

    /// Club members
    #[command(subcommand)]
    Users(UsersCommand),

    /// Activities and who has done them
    #[command(subcommand)]
    Activities(ActivitiesCommand),

    /// Attendance days and presence
    #[command(subcommand)]
    Attendance(AttendanceCommand),

    /// Tournaments and their games
    #[command(subcommand)]
    Tournaments(TournamentsCommand),

    /// Club events
    #[command(subcommand)]
    Events(EventsCommand),

    /// Resolve a front-end URL path to its view
    Route { path: String },
}

#[derive(Args)]
pub struct PageArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
    #[arg(long)]
    search: Option<String>,
}

impl From<PageArgs> for ListParams {
    fn from(args: PageArgs) -> Self {
        ListParams {
            page: args.page,
            per_page: args.per_page,
            search: args.search,
        }
    }
}

#[derive(Subcommand)]
pub enum NewsCommand {
    List(PageArgs),
    Show { id: u64 },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    Update {
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    Delete { id: u64 },
}

#[derive(Subcommand)]
pub enum CommentsCommand {
    List { news_id: u64 },
    Add {
        news_id: u64,
        #[arg(long)]
        username: String,
        #[arg(long)]
        text: String,
    },
    Delete { news_id: u64, comment_id: u64 },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    List(PageArgs),
    Show { username: String },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Delete { username: String },
}

#[derive(Subcommand)]
pub enum ActivitiesCommand {
    List,
    /// Users × activities with scores
    Table,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        weight: f64,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete { name: String },
    Assign { username: String, activity: String },
    Unassign { username: String, activity: String },
}

#[derive(Subcommand)]
pub enum AttendanceCommand {
    /// Users × days presence matrix
    Table,
    AddDay {
        /// Date of the day (YYYY-MM-DD)
        date: NaiveDate,
    },
    DeleteDay { day_id: u64 },
    Mark { day_id: u64, username: String },
    Unmark { day_id: u64, username: String },
}

#[derive(Subcommand)]
pub enum TournamentsCommand {
    List(PageArgs),
    /// Tournament with games and standings
    Show { id: u64 },
    Create {
        #[arg(long)]
        title: String,
        /// Date of the tournament (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete { id: u64 },
    AddGame {
        id: u64,
        #[arg(long)]
        white: String,
        #[arg(long)]
        black: String,
        /// Winner's username, "draw", or empty while undecided
        #[arg(long, default_value = "")]
        winner: String,
        #[arg(long, default_value = "")]
        pgn: String,
    },
}

#[derive(Subcommand)]
pub enum EventsCommand {
    List(PageArgs),
    Create {
        #[arg(long)]
        name: String,
        /// Date of the event (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete { id: u64 },
}

/// Run one command against `club`.
pub async fn run(club: &Clubdesk, command: Commands) -> Result<(), ClientError> {
    match command {
        Commands::Login { username, password } => {
            let token = club
                .session
                .login(&Credentials { username, password })
                .await?;
            print_json(&token)
        }
        Commands::News(command) => run_news(club, command).await,
        Commands::Comments(command) => run_comments(club, command).await,
        Commands::Users(command) => run_users(club, command).await,
        Commands::Activities(command) => run_activities(club, command).await,
        Commands::Attendance(command) => run_attendance(club, command).await,
        Commands::Tournaments(command) => run_tournaments(club, command).await,
        Commands::Events(command) => run_events(club, command).await,
        Commands::Route { path } => {
            let route = Route::resolve(&path);
            println!("{} {}", route.name(), route);
            Ok(())
        }
    }
}

async fn run_news(club: &Clubdesk, command: NewsCommand) -> Result<(), ClientError> {
    let news = &club.news;
    match command {
        NewsCommand::List(page) => news.list_with(page.into()).await?,
        NewsCommand::Show { id } => {
            news.show(id).await?;
            return print_cell(news.current());
        }
        NewsCommand::Create { title, text } => news.create(&NewNews { title, text }).await?,
        NewsCommand::Update { id, title, text } => {
            news.update(id, &NewNews { title, text }).await?
        }
        NewsCommand::Delete { id } => report(news.destroy(id).await?),
    }
    print_cell(news.news())
}

async fn run_comments(club: &Clubdesk, command: CommentsCommand) -> Result<(), ClientError> {
    let comments = match &command {
        CommentsCommand::List { news_id }
        | CommentsCommand::Add { news_id, .. }
        | CommentsCommand::Delete { news_id, .. } => club.comments(*news_id),
    };
    match command {
        CommentsCommand::List { .. } => comments.list().await?,
        CommentsCommand::Add { username, text, .. } => {
            comments.create(&NewComment { username, text }).await?
        }
        CommentsCommand::Delete { comment_id, .. } => report(comments.destroy(comment_id).await?),
    }
    print_cell(comments.comments())
}

async fn run_users(club: &Clubdesk, command: UsersCommand) -> Result<(), ClientError> {
    let users = &club.users;
    match command {
        UsersCommand::List(page) => users.list_with(page.into()).await?,
        UsersCommand::Show { username } => {
            users.show(&username).await?;
            return print_cell(users.current());
        }
        UsersCommand::Create {
            username,
            name,
            surname,
            email,
            password,
        } => {
            users
                .create(&NewUser {
                    username,
                    name,
                    surname,
                    email,
                    password,
                })
                .await?
        }
        UsersCommand::Delete { username } => report(users.destroy(&username).await?),
    }
    print_cell(users.users())
}

async fn run_activities(club: &Clubdesk, command: ActivitiesCommand) -> Result<(), ClientError> {
    let activities = &club.activities;
    match command {
        ActivitiesCommand::List => activities.list().await?,
        ActivitiesCommand::Create {
            name,
            weight,
            description,
        } => {
            activities
                .create(&NewActivity {
                    name,
                    weight,
                    description,
                })
                .await?
        }
        ActivitiesCommand::Delete { name } => report(activities.destroy(&name).await?),
        ActivitiesCommand::Table => {
            activities.load_table().await?;
            return print_table_rows(activities.table(), |t| t.rows());
        }
        ActivitiesCommand::Assign { username, activity } => {
            activities
                .assign(&UserActivity { username, activity })
                .await?;
            return print_table_rows(activities.table(), |t| t.rows());
        }
        ActivitiesCommand::Unassign { username, activity } => {
            report(activities.unassign(&username, &activity).await?);
            return print_table_rows(activities.table(), |t| t.rows());
        }
    }
    print_cell(activities.activities())
}

async fn run_attendance(club: &Clubdesk, command: AttendanceCommand) -> Result<(), ClientError> {
    let attendance = &club.attendance;
    match command {
        AttendanceCommand::Table => attendance.load().await?,
        AttendanceCommand::AddDay { date } => {
            attendance.create_day(&NewAttendanceDay { date }).await?
        }
        AttendanceCommand::DeleteDay { day_id } => report(attendance.destroy_day(day_id).await?),
        AttendanceCommand::Mark { day_id, username } => {
            attendance.mark(day_id, &username).await?
        }
        AttendanceCommand::Unmark { day_id, username } => {
            report(attendance.unmark(day_id, &username).await?)
        }
    }
    print_table_rows(attendance.table(), |t| t.rows())
}

async fn run_tournaments(club: &Clubdesk, command: TournamentsCommand) -> Result<(), ClientError> {
    let tournaments = &club.tournaments;
    match command {
        TournamentsCommand::List(page) => tournaments.list_with(page.into()).await?,
        TournamentsCommand::Show { id } => {
            tournaments.show(id).await?;
            return print_tournament(tournaments.current());
        }
        TournamentsCommand::Create {
            title,
            date,
            description,
        } => {
            tournaments
                .create(&NewTournament {
                    title,
                    date,
                    description,
                })
                .await?
        }
        TournamentsCommand::Delete { id } => report(tournaments.destroy(id).await?),
        TournamentsCommand::AddGame {
            id,
            white,
            black,
            winner,
            pgn,
        } => {
            tournaments
                .add_game(
                    id,
                    &NewGame {
                        black,
                        white,
                        winner,
                        pgn,
                    },
                )
                .await?;
            return print_tournament(tournaments.current());
        }
    }
    print_cell(tournaments.tournaments())
}

async fn run_events(club: &Clubdesk, command: EventsCommand) -> Result<(), ClientError> {
    let events = &club.events;
    match command {
        EventsCommand::List(page) => events.list_with(page.into()).await?,
        EventsCommand::Create {
            name,
            date,
            description,
        } => {
            events
                .create(&NewEvent {
                    name,
                    date,
                    description,
                })
                .await?
        }
        EventsCommand::Delete { id } => report(events.destroy(id).await?),
    }
    print_cell(events.events())
}

fn report(outcome: Mutation) {
    if outcome == Mutation::Cancelled {
        eprintln!("Cancelled.");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_cell<T: Serialize>(cell: &StateCell<Option<T>>) -> Result<(), ClientError> {
    cell.with(|value| match value {
        Some(value) => print_json(value),
        None => Ok(()),
    })
}

fn print_table_rows<T, R: Serialize>(
    cell: &StateCell<Option<T>>,
    rows: impl Fn(&T) -> Vec<R>,
) -> Result<(), ClientError> {
    cell.with(|table| match table {
        Some(table) => print_json(&rows(table)),
        None => Ok(()),
    })
}

fn print_tournament(
    cell: &StateCell<Option<clubdesk::models::Tournament>>,
) -> Result<(), ClientError> {
    cell.with(|tournament| match tournament {
        Some(tournament) => print_json(&serde_json::json!({
            "tournament": tournament,
            "standings": tournament.standings(),
        })),
        None => Ok(()),
    })
}
