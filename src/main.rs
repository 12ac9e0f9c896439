use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use hangeul_md::app::controllers::print::compose;
use hangeul_md::app::domain::page::HeaderFooterRow;
use hangeul_md::app::infrastructure::print_export::default_output_path;
use hangeul_md::app::{
    AppSettings, DocumentController, FsPlatform, HtmlExportSurface, MarkupEditor, Platform,
    PrintOutcome, PrintSettings,
};

#[derive(Parser, Debug)]
#[command(
    name = "hangeul-md",
    version,
    about = "Paginate and print 한글MD Markdown documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Paginate a document and export it as a printable HTML file
    Print {
        file: PathBuf,
        /// Export path (default: <FILE>.print.html)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Do not open the exported file in the system viewer
        #[arg(long)]
        no_open: bool,
    },
    /// List the pages of a document with their numbers and headers/footers
    Pages { file: PathBuf },
    /// Edit the print settings stored in a document's front matter
    Settings(SettingsArgs),
    /// Pick a document with the native file dialog and print it
    #[cfg(feature = "native-dialogs")]
    Open,
}

#[derive(clap::Args, Debug)]
struct SettingsArgs {
    file: PathBuf,
    #[arg(long)]
    header_left: Option<String>,
    #[arg(long)]
    header_center: Option<String>,
    #[arg(long)]
    header_right: Option<String>,
    #[arg(long)]
    footer_left: Option<String>,
    #[arg(long)]
    footer_center: Option<String>,
    #[arg(long)]
    footer_right: Option<String>,
    /// Suppress header/footer on the cover page (true/false)
    #[arg(long)]
    exclude_first_page: Option<bool>,
    /// Start from empty settings, removing the front matter
    #[arg(long)]
    clear: bool,
}

impl SettingsArgs {
    fn apply(self, current: PrintSettings) -> PrintSettings {
        let mut settings = if self.clear { PrintSettings::default() } else { current };
        let fields = [
            (self.header_left, &mut settings.header_left),
            (self.header_center, &mut settings.header_center),
            (self.header_right, &mut settings.header_right),
            (self.footer_left, &mut settings.footer_left),
            (self.footer_center, &mut settings.footer_center),
            (self.footer_right, &mut settings.footer_right),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(exclude) = self.exclude_first_page {
            settings.exclude_first_page = exclude;
        }
        settings
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hangeul_md=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let settings = AppSettings::load();

    match cli.command {
        Commands::Print {
            file,
            output,
            no_open,
        } => {
            let mut ctl = open_document(FsPlatform::new(), settings, &file)?;
            let output = output.unwrap_or_else(|| default_output_path(&file));
            print_document(&mut ctl, output, !no_open)
        }
        Commands::Pages { file } => {
            let ctl = open_document(FsPlatform::new(), settings, &file)?;
            list_pages(&ctl);
            Ok(())
        }
        Commands::Settings(args) => {
            let file = args.file.clone();
            let mut ctl = open_document(FsPlatform::new(), settings, &file)?;
            let updated = args.apply(ctl.state().print_settings.clone());
            ctl.set_print_settings(updated);
            if !ctl.save() {
                bail!("could not save {}", file.display());
            }
            println!("Saved print settings to {}", file.display());
            Ok(())
        }
        #[cfg(feature = "native-dialogs")]
        Commands::Open => {
            let _app = fltk::app::App::default();
            let mut ctl =
                DocumentController::new(MarkupEditor::new(), hangeul_md::ui::FltkPlatform, settings);
            if !ctl.open() {
                return Ok(());
            }
            let path = ctl
                .state()
                .file_path
                .clone()
                .context("opened document has no path")?;
            let output = default_output_path(Path::new(&path));
            print_document(&mut ctl, output, true)
        }
    }
}

fn open_document<P: Platform>(
    platform: P,
    settings: AppSettings,
    file: &Path,
) -> Result<DocumentController<MarkupEditor, P>> {
    let mut ctl = DocumentController::new(MarkupEditor::new(), platform, settings);
    let path = file.to_string_lossy();
    if !ctl.open_path(&path) {
        bail!("could not open {}", file.display());
    }
    Ok(ctl)
}

fn print_document<P: Platform>(
    ctl: &mut DocumentController<MarkupEditor, P>,
    output: PathBuf,
    allow_open: bool,
) -> Result<()> {
    let settings = ctl.settings().clone();
    let mut surface = HtmlExportSurface::new(output, ctl.state().file_name.clone(), settings.page_size)
        .open_after_export(allow_open && settings.open_after_export);

    match ctl.print(&mut surface).context("print failed")? {
        PrintOutcome::Completed => println!("Exported {}", surface.output().display()),
        PrintOutcome::Cancelled => println!("Print cancelled"),
    }

    if let Err(e) = ctl.settings().save() {
        tracing::warn!("Failed to save settings: {}", e);
    }
    Ok(())
}

fn describe_row(row: Option<&HeaderFooterRow>) -> String {
    match row {
        Some(row) if !row.is_blank() => format!("[{} | {} | {}]", row.left, row.center, row.right),
        Some(_) => "[blank]".to_string(),
        None => "-".to_string(),
    }
}

fn list_pages<P: Platform>(ctl: &DocumentController<MarkupEditor, P>) {
    use hangeul_md::app::domain::editor::EditorSurface;

    let pages = compose(&ctl.editor().markup(), &ctl.state().print_settings);
    for page in &pages {
        let label = if page.has_chrome() {
            format!("page {}", page.page_number)
        } else {
            "cover".to_string()
        };
        println!(
            "segment {:>3}  {:<10} header {}  footer {}",
            page.segment.index,
            label,
            describe_row(page.header.as_ref()),
            describe_row(page.footer.as_ref())
        );
    }
}
