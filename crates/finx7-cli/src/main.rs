mod logging;
mod preview;
mod render;
mod server_utils;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use finx7::SiteOptions;
use finx7::client::{ContentApi, MemoryContent, SanityClient};
use finx7::errors::{ConfigError, Finx7Error};
use finx7::views::DEFAULT_VIEWPORT_WIDTH;
use finx7::views::contact::FormSubmitRelay;
use logging::init_logging;
use preview::start_preview_web_server;
use render::render_page;
use tracing::{error, info};

const CONFIG_FILE: &str = "finx7.toml";
const PORT: u16 = 3000;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Silence all log output
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one page to HTML
    Render {
        /// Path of the page, e.g. `/blogs` or `/blog/<id>`
        path: String,

        /// Page of the blog list to render
        #[arg(long)]
        page: Option<usize>,

        /// Viewport width the page is laid out for
        #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
        width: u32,

        /// Write the HTML to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        site: SiteArgs,
    },
    /// Serve the site locally, fetching content on every request
    Preview {
        /// Expose the server to the local network
        #[arg(long)]
        host: bool,

        /// First port to try; the next free one is used if it is taken
        #[arg(long, default_value_t = PORT)]
        port: u16,

        #[command(flatten)]
        site: SiteArgs,
    },
}

#[derive(Args)]
struct SiteArgs {
    /// Options file. Defaults to `finx7.toml` in the current directory, if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve posts from a JSON file instead of the content store
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Dataset to query, overriding the options file
    #[arg(long)]
    dataset: Option<String>,

    /// Query the live API instead of the CDN
    #[arg(long)]
    no_cdn: bool,
}

impl SiteArgs {
    fn options(&self) -> Result<SiteOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => SiteOptions::from_file(path)?,
            None if Path::new(CONFIG_FILE).exists() => SiteOptions::from_file(CONFIG_FILE)?,
            None => SiteOptions::default(),
        };

        if let Some(dataset) = &self.dataset {
            options.dataset = dataset.clone();
        }
        if self.no_cdn {
            options.use_cdn = false;
        }

        Ok(options)
    }

    fn client(&self, options: &SiteOptions) -> Result<Arc<dyn ContentApi>, ConfigError> {
        match &self.fixtures {
            Some(path) => {
                info!(name: "content", "serving posts from {}", path.display());
                let content = MemoryContent::from_file(path)?.with_project(&options.project_id, &options.dataset);
                Ok(Arc::new(content))
            }
            None => Ok(Arc::new(SanityClient::new(options))),
        }
    }
}

async fn run(cli: Cli) -> Result<(), Finx7Error> {
    match cli.command {
        Commands::Render {
            path,
            page,
            width,
            output,
            site,
        } => {
            let options = site.options()?;
            let client = site.client(&options)?;
            render_page(client, &options, &path, page, width, output.as_deref()).await
        }
        Commands::Preview { host, port, site } => {
            let options = site.options()?;
            let client = site.client(&options)?;
            let relay = Arc::new(FormSubmitRelay::new(&options));
            start_preview_web_server(client, relay, options, host, port).await?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.quiet);

    if let Err(err) = run(cli).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
