//! `mythos`: the Mythos Engine terminal frontend.
//!
//! ```bash
//! mythos login ursula
//! mythos show /projects/1/home
//! mythos article new --project 1 --type location --set title=Havnor --add trade_goods=salt
//! mythos upload --project 1 --convert --max-width 1600 map.png
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mythos_client::api::ImageFile;
use mythos_client::convert::{convert_with_alts, ConversionOptions, OutputFormat, DEFAULT_QUALITY};
use mythos_client::upload::upload_many;
use mythos_client::{ApiClient, ClientConfig, Queries};
use mythos_core::article::ArticleType;
use mythos_core::image::{MIME_GIF, MIME_JPEG, MIME_PNG, MIME_WEBP};
use mythos_core::pagination::Page;
use mythos_core::project::CreateProject;
use mythos_core::types::DbId;
use mythos_frontend::pages::Pages;
use mythos_frontend::{ArticleForm, ArticleView, FormContext, Route, UserSession};

#[derive(Parser)]
#[command(name = "mythos")]
#[command(about = "Browse and edit Mythos Engine worlds", long_about = None)]
#[command(version)]
struct Cli {
    /// API root, including the version prefix
    #[arg(long, env = "MYTHOS_API_URL", global = true)]
    api_url: Option<String>,

    /// File remembering the selected user
    #[arg(long, env = "MYTHOS_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page at a path, e.g. /projects/1/home
    Show {
        #[arg(value_name = "PATH", default_value = "/")]
        path: String,
    },

    /// Select the user whose view is shown
    Login {
        #[arg(value_name = "USERNAME")]
        username: String,
    },

    /// Clear the selected user
    Logout,

    /// Print the selected user
    Whoami,

    /// Create, edit or delete articles
    Article {
        #[command(subcommand)]
        subcommand: ArticleCommands,
    },

    /// Create or delete projects
    Project {
        #[command(subcommand)]
        subcommand: ProjectCommands,
    },

    /// Upload images into a project
    Upload(UploadArgs),
}

#[derive(Subcommand)]
enum ArticleCommands {
    /// List the fields the form for a kind accepts
    Fields {
        #[arg(long = "type", value_name = "KIND")]
        kind: Option<ArticleType>,
    },

    /// Create an article
    New {
        #[arg(long)]
        project: DbId,

        #[arg(long = "type", value_name = "KIND")]
        kind: Option<ArticleType>,

        #[command(flatten)]
        edits: FormEdits,
    },

    /// Edit an existing article
    Edit {
        #[arg(value_name = "ID")]
        id: DbId,

        #[command(flatten)]
        edits: FormEdits,
    },

    /// Delete an article
    Delete {
        #[arg(value_name = "ID")]
        id: DbId,
    },
}

#[derive(Args)]
struct FormEdits {
    /// Set a field: field=value (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Append to a list field: field=item (repeatable)
    #[arg(long = "add", value_name = "FIELD=ITEM", value_parser = parse_assignment)]
    add: Vec<(String, String)>,

    /// Remove from a list field: field=item (repeatable)
    #[arg(long = "remove", value_name = "FIELD=ITEM", value_parser = parse_assignment)]
    remove: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Create a project owned by the selected user
    Create {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a project
    Delete {
        #[arg(value_name = "ID")]
        id: DbId,
    },
}

#[derive(Args)]
struct UploadArgs {
    #[arg(long)]
    project: DbId,

    /// Alt text, matched to files by position (repeatable)
    #[arg(long = "alt", value_name = "TEXT")]
    alt: Vec<String>,

    /// Convert before uploading
    #[arg(long)]
    convert: bool,

    #[arg(long, default_value = "webp", requires = "convert")]
    format: OutputFormat,

    /// JPEG quality, 0.0 to 1.0
    #[arg(long, default_value_t = DEFAULT_QUALITY, requires = "convert")]
    quality: f32,

    #[arg(long, requires = "convert")]
    max_width: Option<u32>,

    #[arg(long, requires = "convert")]
    max_height: Option<u32>,

    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mythos=info,mythos_frontend=info,mythos_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.api_url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    let queries = Queries::new(ApiClient::new(&config));
    let mut session =
        UserSession::load(cli.session_file.unwrap_or_else(UserSession::default_path));

    match cli.command {
        Commands::Show { path } => {
            let route = Route::resolve(&path);
            print!("{}", Pages::new(&queries, &session).render(&route).await);
        }
        Commands::Login { username } => {
            let user = queries
                .user_by_username(&username)
                .await
                .with_context(|| format!("no user '{username}'"))?;
            let greeting = format!("Signed in as {} (@{})", user.display_name(), user.username);
            session.set_current_user(Some(user))?;
            println!("{greeting}");
        }
        Commands::Logout => {
            session.set_current_user(None)?;
            println!("Signed out");
        }
        Commands::Whoami => match session.current_user() {
            Some(user) => println!("{} (@{}) #{}", user.display_name(), user.username, user.id),
            None => println!("No user selected"),
        },
        Commands::Article { subcommand } => article(&queries, &session, subcommand).await?,
        Commands::Project { subcommand } => project(&queries, &session, subcommand).await?,
        Commands::Upload(args) => upload(&queries, args).await?,
    }
    Ok(())
}

async fn article(
    queries: &Queries,
    session: &UserSession,
    command: ArticleCommands,
) -> anyhow::Result<()> {
    let (mut form, edits) = match command {
        ArticleCommands::Fields { kind } => {
            let form = ArticleForm::dispatch(None, kind, FormContext::default());
            for field in form.fields() {
                let required = if field.required { " (required)" } else { "" };
                println!("{:<24} {}{required}", field.name, field.label);
            }
            return Ok(());
        }
        ArticleCommands::Delete { id } => {
            queries.delete_article(id).await?;
            println!("Deleted article #{id}");
            return Ok(());
        }
        ArticleCommands::New { project, kind, edits } => {
            let ctx = FormContext {
                images: project_images(queries, project).await,
                is_loading: false,
                project_id: Some(project),
                author_id: session.current_user_id(),
            };
            (ArticleForm::dispatch(None, kind, ctx), edits)
        }
        ArticleCommands::Edit { id, edits } => {
            let existing = queries
                .article(id)
                .await
                .with_context(|| format!("could not load article #{id}"))?;
            let ctx = FormContext {
                images: project_images(queries, existing.project_id).await,
                ..Default::default()
            };
            (ArticleForm::dispatch(Some(&existing), None, ctx), edits)
        }
    };

    for (field, value) in &edits.set {
        form.set(field, value)?;
    }
    for (field, item) in &edits.add {
        form.add(field, item)?;
    }
    for (field, item) in &edits.remove {
        form.remove(field, item)?;
    }

    let submission = form.submit()?;
    form.set_loading(true);
    let saved = submission.send(queries).await?;
    form.set_loading(false);

    tracing::info!(article_id = saved.id, project_id = saved.project_id, "Article saved");
    print!("{}", ArticleView::dispatch(&saved).render());
    Ok(())
}

/// Header image choices; an unreachable image list only means no choices.
async fn project_images(queries: &Queries, project_id: DbId) -> Vec<mythos_core::image::Image> {
    match queries.project_images(project_id, &Page::default()).await {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(project_id, error = %e, "Could not load project images");
            Vec::new()
        }
    }
}

async fn project(
    queries: &Queries,
    session: &UserSession,
    command: ProjectCommands,
) -> anyhow::Result<()> {
    match command {
        ProjectCommands::Create { name, description } => {
            let Some(owner_id) = session.current_user_id() else {
                bail!("select a user with `mythos login` before creating a project");
            };
            let input = CreateProject {
                name,
                description,
                owner_id: Some(owner_id),
            };
            let created = queries.create_project(&input).await?;
            println!("Created project #{} {}", created.id, created.name);
        }
        ProjectCommands::Delete { id } => {
            queries.delete_project(id).await?;
            println!("Deleted project #{id}");
        }
    }
    Ok(())
}

fn mime_for(path: &Path) -> anyhow::Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    Ok(match ext.as_str() {
        "jpg" | "jpeg" => MIME_JPEG,
        "png" => MIME_PNG,
        "webp" => MIME_WEBP,
        "gif" => MIME_GIF,
        _ => bail!("{} is not a supported image", path.display()),
    })
}

async fn upload(queries: &Queries, args: UploadArgs) -> anyhow::Result<()> {
    let mut files: Vec<ImageFile> = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        files.push(ImageFile::new(filename, mime_for(path)?, data));
    }

    let mut alts = args.alt.into_iter();
    let mut pairs: Vec<(ImageFile, Option<String>)> = files
        .into_iter()
        .map(|file| (file, alts.next()))
        .collect();

    if args.convert {
        let options = ConversionOptions {
            quality: args.quality,
            max_width: args.max_width,
            max_height: args.max_height,
            format: args.format,
        };
        pairs = convert_with_alts(pairs, &options);
        if pairs.is_empty() {
            bail!("no image could be converted");
        }
    }

    let (files, alt_texts): (Vec<ImageFile>, Vec<Option<String>>) = pairs.into_iter().unzip();
    let uploaded = upload_many(queries, files, args.project, &alt_texts).await?;
    for image in &uploaded {
        println!("Uploaded #{} {} ({} bytes)", image.id, image.filename, image.file_size);
    }
    Ok(())
}
