use crate::error::{Error, Result};
use crate::options::{Options, partition};
use crate::registry::CodeRegistry;
use crate::table::Table;
use serde_json::{Value, json};
use tracing::info;

/// Closed set of figure variants. Choropleth is the only one today; new
/// kinds slot in here with their own allowlist and defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    Choropleth,
}

/// Construction parameters the choropleth call accepts directly. Anything
/// outside this list is applied to the figure after construction instead.
const CHOROPLETH_DISPLAY_KEYS: &[&str] = &[
    "lat",
    "lon",
    "locations",
    "locationmode",
    "color",
    "hover_name",
    "hover_data",
    "color_discrete_sequence",
    "color_discrete_map",
    "color_continuous_scale",
    "range_color",
    "color_continuous_midpoint",
    "projection",
    "scope",
    "center",
    "title",
    "width",
    "height",
];

impl FigureKind {
    pub fn display_keys(&self) -> &'static [&'static str] {
        match self {
            FigureKind::Choropleth => CHOROPLETH_DISPLAY_KEYS,
        }
    }

    /// Display-option defaults, injected for keys the caller leaves out.
    pub fn defaults(&self) -> Options {
        match self {
            FigureKind::Choropleth => json!({
                "locations": "ISO3",
                "color": "Data",
                "hover_name": "Country",
                "color_continuous_scale": ["#BFD1D7", "#00485E"],
            })
            .as_object()
            .cloned()
            .unwrap_or_default(),
        }
    }
}

/// A fully assembled figure request: the variant plus the two partitioned
/// option sets the rendering collaborator consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub kind: FigureKind,
    pub display: Options,
    pub update: Options,
}

/// Rendering collaborator. The core never inspects what it produces — the
/// spec and table are handed over as-is.
pub trait Renderer {
    fn render(&self, table: &Table, spec: &FigureSpec) -> anyhow::Result<()>;
}

/// Tabular data prepared for geographic figures: the input table with an
/// `ISO3` column derived from `Country` through the registry.
#[derive(Debug, Clone)]
pub struct GeoFrame {
    table: Table,
}

impl GeoFrame {
    /// Attach the `ISO3` column. Each `Country` cell is looked up in the
    /// registry; a name without a known code passes through unchanged, so
    /// the column is always fully populated and gaps stay visible in the
    /// rendered output rather than erroring here.
    pub fn new(table: Table, registry: &CodeRegistry) -> Result<Self> {
        let codes = registry.load()?;
        let countries = table
            .column("Country")
            .ok_or_else(|| Error::MissingColumn("Country".to_string()))?;

        let iso3: Vec<Value> = countries
            .iter()
            .map(|cell| match cell {
                Value::String(name) => codes
                    .get(name)
                    .map(|code| Value::String(code.clone()))
                    .unwrap_or_else(|| cell.clone()),
                other => other.clone(),
            })
            .collect();

        let mut table = table;
        table.insert_column("ISO3", iso3);
        info!("Attached ISO-3 codes to {} rows.", table.row_count());
        Ok(Self { table })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Assemble the figure request: partition `options` against the kind's
    /// allowlist, injecting its defaults for absent display keys.
    pub fn build_figure(&self, kind: FigureKind, options: Options) -> Result<FigureSpec> {
        let parts = partition(options, kind.display_keys(), &kind.defaults())?;
        Ok(FigureSpec {
            kind,
            display: parts.display,
            update: parts.update,
        })
    }

    /// Build and hand off to the renderer in one step.
    pub fn display(
        &self,
        kind: FigureKind,
        options: Options,
        renderer: &dyn Renderer,
    ) -> anyhow::Result<()> {
        let spec = self.build_figure(kind, options)?;
        renderer.render(&self.table, &spec)
    }
}
