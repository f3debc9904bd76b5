#![forbid(unsafe_code)]

//! `lanegraph` draws sequential layer specifications (a `backbone` and a `head` list of
//! `[from, repeats, kind, args]` entries) as three-lane diagrams.
//!
//! # Features
//!
//! - `render`: enable layout, theming and SVG/Mermaid output (`lanegraph::render`)

pub use lanegraph_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use lanegraph_render::config::{ConfigOverrides, LayoutConfig};
    pub use lanegraph_render::mermaid::render_mermaid;
    pub use lanegraph_render::model::{LayoutedDiagram, PlacedNode, RoutedEdge, RoutingStyle};
    pub use lanegraph_render::svg::{SvgRenderOptions, render_svg};
    pub use lanegraph_render::theme::{DEFAULT_THEME, Theme, ThemeRegistry};
    pub use lanegraph_render::{LayoutOptions, RenderFormat, layout_parsed};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] lanegraph_core::Error),
        #[error(transparent)]
        Render(#[from] lanegraph_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string (typically a file stem) into an SVG `id` token.
    ///
    /// The root id prefixes marker and gradient ids, so diagrams inlined into one page need
    /// distinct, valid ids.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        let mut out = String::with_capacity(raw.len() + 3);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let trimmed = out.trim_matches('-');
        if trimmed.is_empty() {
            return "lg-untitled".to_string();
        }
        if trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
            trimmed.to_string()
        } else {
            format!("lg-{trimmed}")
        }
    }

    /// Synchronous parse + layout helper.
    pub fn layout_model_sync(
        engine: &lanegraph_core::Engine,
        text: &str,
        parse_options: lanegraph_core::ParseOptions,
        layout_options: &LayoutOptions,
    ) -> Result<LayoutedDiagram> {
        let parsed = engine.parse_model_sync(text, parse_options)?;
        Ok(layout_parsed(&parsed, layout_options)?)
    }

    pub fn render_svg_sync(
        engine: &lanegraph_core::Engine,
        text: &str,
        parse_options: lanegraph_core::ParseOptions,
        layout_options: &LayoutOptions,
        theme: &Theme,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let diagram = layout_model_sync(engine, text, parse_options, layout_options)?;
        Ok(render_svg(&diagram, theme, svg_options))
    }

    pub fn render_mermaid_sync(
        engine: &lanegraph_core::Engine,
        text: &str,
        parse_options: lanegraph_core::ParseOptions,
        theme: &Theme,
    ) -> Result<String> {
        let parsed = engine.parse_model_sync(text, parse_options)?;
        Ok(render_mermaid(&parsed, theme))
    }

    /// Bundles an [`Engine`](lanegraph_core::Engine), a resolved theme and the layout/SVG
    /// options so callers render with a single call.
    #[derive(Debug, Clone)]
    pub struct HeadlessRenderer {
        pub engine: lanegraph_core::Engine,
        pub parse: lanegraph_core::ParseOptions,
        pub layout: LayoutOptions,
        pub theme: Theme,
        pub svg: SvgRenderOptions,
    }

    impl Default for HeadlessRenderer {
        fn default() -> Self {
            Self {
                engine: lanegraph_core::Engine::new(),
                parse: lanegraph_core::ParseOptions::default(),
                layout: LayoutOptions::default(),
                theme: ThemeRegistry::builtin().default_theme().clone(),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_engine(mut self, engine: lanegraph_core::Engine) -> Self {
            self.engine = engine;
            self
        }

        pub fn with_parse_options(mut self, parse: lanegraph_core::ParseOptions) -> Self {
            self.parse = parse;
            self
        }

        pub fn with_theme(mut self, theme: Theme) -> Self {
            self.theme = theme;
            self
        }

        /// Resolves `name` in `registry`; unknown names fall back to the default theme.
        pub fn with_theme_name(self, registry: &ThemeRegistry, name: &str) -> Self {
            let theme = registry.resolve(name).clone();
            self.with_theme(theme)
        }

        /// Applies `overrides` to the current layout config and the theme named `theme_name`.
        pub fn with_overrides(
            mut self,
            registry: &ThemeRegistry,
            theme_name: &str,
            overrides: &ConfigOverrides,
        ) -> Result<Self> {
            self.layout.config = overrides.apply("layout", &self.layout.config)?;
            self.layout.config.validate()?;
            self.theme = overrides.theme(registry, theme_name)?;
            Ok(self)
        }

        pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
            self.svg = svg;
            self
        }

        pub fn parse_model_sync(&self, text: &str) -> Result<lanegraph_core::ParsedModel> {
            Ok(self.engine.parse_model_sync(text, self.parse)?)
        }

        pub fn layout_model_sync(&self, text: &str) -> Result<LayoutedDiagram> {
            layout_model_sync(&self.engine, text, self.parse, &self.layout)
        }

        pub fn render_svg_sync(&self, text: &str) -> Result<String> {
            render_svg_sync(
                &self.engine,
                text,
                self.parse,
                &self.layout,
                &self.theme,
                &self.svg,
            )
        }

        pub fn render_mermaid_sync(&self, text: &str) -> Result<String> {
            render_mermaid_sync(&self.engine, text, self.parse, &self.theme)
        }

        pub fn render_sync(&self, text: &str, format: RenderFormat) -> Result<String> {
            match format {
                RenderFormat::Svg => self.render_svg_sync(text),
                RenderFormat::Mermaid => self.render_mermaid_sync(text),
            }
        }
    }
}
