//! Print composition: split the document, number the pages, stamp headers
//! and footers, then hand everything to the print surface in one go.

use crate::app::domain::page::{PageSegment, RenderedPage};
use crate::app::domain::print_settings::PrintSettings;
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::html_tree::HtmlTree;
use crate::app::services::header_footer::build_row_from;
use crate::app::services::page_numbers::{page_number, printable_page_count, shows_chrome};
use crate::app::services::page_split::{self, DocumentTree};

/// How the print surface finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    Completed,
    Cancelled,
}

/// Host print or export facility.
pub trait PrintSurface {
    /// Print every page in `container`. Returning, with any result, is the
    /// completion signal; the container is released right after.
    fn print(&mut self, container: &mut PrintContainer) -> Result<PrintOutcome>;
}

type ReleaseHook = Box<dyn FnOnce()>;

/// Transient holder of the rendered pages for one print operation.
///
/// Released exactly once: explicitly after the surface returns, or on drop
/// if composition is abandoned by an error or panic.
pub struct PrintContainer {
    pages: Vec<RenderedPage>,
    release_hooks: Vec<ReleaseHook>,
    released: bool,
}

impl PrintContainer {
    fn acquire() -> Self {
        tracing::debug!("print container acquired");
        Self {
            pages: Vec::new(),
            release_hooks: Vec::new(),
            released: false,
        }
    }

    fn append(&mut self, page: RenderedPage) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[RenderedPage] {
        &self.pages
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Run `hook` when the container is released.
    pub fn on_release(&mut self, hook: impl FnOnce() + 'static) {
        if self.released {
            hook();
        } else {
            self.release_hooks.push(Box::new(hook));
        }
    }

    /// Every page block, in order.
    pub fn to_html(&self) -> String {
        self.pages.iter().map(RenderedPage::to_html).collect()
    }

    /// Idempotent.
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.pages.clear();
        for hook in self.release_hooks.drain(..) {
            hook();
        }
        tracing::debug!("print container released");
    }
}

impl Drop for PrintContainer {
    fn drop(&mut self) {
        self.release();
    }
}

/// Render one page per segment, in segment order.
pub fn compose_segments(segments: Vec<PageSegment>, settings: &PrintSettings) -> Vec<RenderedPage> {
    let exclude = settings.exclude_first_page;
    let total = printable_page_count(segments.len(), exclude);

    segments
        .into_iter()
        .map(|segment| {
            let number = page_number(segment.index, exclude);
            let (header, footer) = if shows_chrome(segment.index, exclude) {
                (
                    Some(build_row_from(settings.header(), number, total)),
                    Some(build_row_from(settings.footer(), number, total)),
                )
            } else {
                (None, None)
            };
            RenderedPage {
                segment,
                page_number: number,
                header,
                footer,
            }
        })
        .collect()
}

pub fn compose_tree<T: DocumentTree>(tree: &T, settings: &PrintSettings) -> Vec<RenderedPage> {
    compose_segments(page_split::split(tree), settings)
}

/// Compose pages from the editor's serialized markup.
pub fn compose(markup: &str, settings: &PrintSettings) -> Vec<RenderedPage> {
    compose_tree(&HtmlTree::parse(markup), settings)
}

/// Compose and print. The surface is invoked once, after every page exists.
pub fn print(
    markup: &str,
    settings: &PrintSettings,
    surface: &mut dyn PrintSurface,
) -> Result<PrintOutcome> {
    let pages = compose(markup, settings);
    tracing::info!(pages = pages.len(), "printing document");

    let mut container = PrintContainer::acquire();
    for page in pages {
        container.append(page);
    }

    let outcome = surface.print(&mut container);
    container.release();
    outcome
}
