mod options;

pub use options::{ButtonGroupOptions, ButtonOptions, LinkOptions};

use crate::button::{
    button_group, plain_link, single_button, wrap_url, Button, ButtonFragments, ButtonGroupSpec,
    ButtonTheme, GroupLayout,
};
use crate::config::{Config, GlueMode};
use crate::markup::{attributes, escape_html, strip_tags};
use crate::render::{HandlebarsRenderer, RenderContext, SectionHtml, TemplateRenderer};
use crate::section::{Section, SectionStore};
use crate::style::{StyleDictionary, StyleResolver, Tag};
use crate::transport::MailTransport;

/// Output of the last compile step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledEmail {
    pub html: String,
    pub plain: String,
}

/// Fluent builder keeping an HTML body and its plaintext alternative in step.
///
/// Every method decides on its own what, if anything, it adds to each
/// channel. Content lands in the current [`Section`]; plaintext sent to the
/// preheader is dropped.
pub struct ContentBuilder<T: MailTransport> {
    config: Config,
    styles: StyleResolver,
    store: SectionStore,
    transport: T,
    renderer: Box<dyn TemplateRenderer>,
    newline: String,
    wrap_chars: usize,
    encode: bool,
    title: String,
    compiled: CompiledEmail,
}

impl<T: MailTransport> ContentBuilder<T> {
    /// Builder with the built-in document template.
    pub fn new(config: Config, transport: T) -> crate::Result<Self> {
        Ok(Self::with_renderer(config, transport, HandlebarsRenderer::new()?))
    }

    pub fn with_renderer(
        config: Config,
        transport: T,
        renderer: impl TemplateRenderer + 'static,
    ) -> Self {
        let styles = StyleResolver::new(&config.colors);
        let newline = transport.newline().to_string();
        let wrap_chars = transport.wrap_chars();
        Self {
            config,
            styles,
            store: SectionStore::new(),
            transport,
            renderer: Box::new(renderer),
            newline,
            wrap_chars,
            encode: true,
            title: String::new(),
            compiled: CompiledEmail::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    pub fn sections(&self) -> &SectionStore {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn last_compiled(&self) -> &CompiledEmail {
        &self.compiled
    }

    pub fn newline(&self) -> &str {
        &self.newline
    }

    // ── Sections ────────────────────────────────────────────────────────────

    pub fn current_section(&self) -> Section {
        self.store.current()
    }

    pub fn section(&mut self, section: Section) -> &mut Self {
        self.store.set_current(section);
        self
    }

    /// Select a section by name; fails with `InvalidSection` and leaves the
    /// cursor where it was.
    pub fn select_section(&mut self, name: &str) -> crate::Result<&mut Self> {
        self.store.set_current_by_name(name)?;
        Ok(self)
    }

    pub fn preheader(&mut self) -> &mut Self {
        self.section(Section::Preheader)
    }

    pub fn body(&mut self) -> &mut Self {
        self.section(Section::Body)
    }

    pub fn footer(&mut self) -> &mut Self {
        self.section(Section::Footer)
    }

    pub fn preheader_text(&mut self, s: &str, plain: Option<&str>) -> &mut Self {
        self.preheader().text(Some(s), plain)
    }

    pub fn body_text(&mut self, s: &str, plain: Option<&str>) -> &mut Self {
        self.body().text(Some(s), plain)
    }

    pub fn footer_text(&mut self, s: &str, plain: Option<&str>) -> &mut Self {
        self.footer().text(Some(s), plain)
    }

    // ── Text ────────────────────────────────────────────────────────────────

    pub fn encode(&self) -> bool {
        self.encode
    }

    /// Turn HTML escaping of `text`, link and button labels on or off.
    pub fn set_encode(&mut self, encode: bool) -> &mut Self {
        self.encode = encode;
        self
    }

    /// Add `html` to the HTML channel (escaped while encoding is on) and
    /// `plain` to the plaintext channel. Without `plain`, the plaintext is
    /// `html` with its tags stripped.
    pub fn text(&mut self, html: Option<&str>, plain: Option<&str>) -> &mut Self {
        let plain = match plain {
            Some(p) => p.to_string(),
            None => strip_tags(html.unwrap_or_default()),
        };
        let html = html.map(|s| {
            if !s.is_empty() && self.encode {
                escape_html(s)
            } else {
                s.to_string()
            }
        });
        self.store.append(html.as_deref(), Some(&plain));
        self
    }

    /// Plaintext-only content.
    pub fn plaintext(&mut self, s: &str) -> &mut Self {
        self.store.append(None, Some(s));
        self
    }

    /// Plaintext-only rule of `ch` repeated `length` times (default: the
    /// transport's wrap width).
    pub fn plaintext_line(&mut self, ch: char, length: Option<usize>) -> &mut Self {
        let length = length.unwrap_or(self.wrap_chars);
        let line = format!("{}{}", ch.to_string().repeat(length), self.newline);
        self.store.append(None, Some(&line));
        self
    }

    /// `<br>` in HTML, a newline in plaintext.
    pub fn brnl(&mut self) -> &mut Self {
        let newline = self.newline.clone();
        self.store.append(Some("<br>"), Some(&newline));
        self
    }

    /// `<br>` in HTML only.
    pub fn br(&mut self) -> &mut Self {
        self.store.append(Some("<br>"), None);
        self
    }

    /// A newline in plaintext only.
    pub fn nl(&mut self) -> &mut Self {
        let newline = self.newline.clone();
        self.store.append(None, Some(&newline));
        self
    }

    // ── Structural helpers ──────────────────────────────────────────────────

    fn style(&self, tag: Tag, overrides: &[(&str, &str)]) -> String {
        self.styles
            .resolve(tag, &StyleDictionary::from_pairs(overrides))
    }

    fn html(&mut self, fragment: &str) -> &mut Self {
        self.store.append(Some(fragment), None);
        self
    }

    fn end_fragments(&self, tag: &str, use_html: bool, newlines: Option<usize>) -> (Option<String>, Option<String>) {
        (
            use_html.then(|| format!("</{tag}>")),
            newlines.map(|n| self.newline.repeat(n)),
        )
    }

    pub fn div_start(&mut self, styles: &[(&str, &str)], plain: Option<&str>) -> &mut Self {
        let html = format!("<div style=\"{}\">", self.style(Tag::Div, styles));
        self.store.append(Some(&html), plain);
        self
    }

    pub fn div_end(&mut self, plain: Option<&str>) -> &mut Self {
        self.store.append(Some("</div>"), plain);
        self
    }

    pub fn p_start(&mut self, styles: &[(&str, &str)]) -> &mut Self {
        let html = format!("<p style=\"{}\">", self.style(Tag::P, styles));
        self.html(&html)
    }

    /// Close a paragraph; the plaintext side gets two newlines.
    pub fn p_end(&mut self, use_html: bool, use_plain: bool) -> &mut Self {
        let (html, plain) = self.end_fragments("p", use_html, use_plain.then_some(2));
        self.store.append(html.as_deref(), plain.as_deref());
        self
    }

    /// Whole paragraph. With `html` absent only `plain` is added, followed by
    /// the paragraph's newlines unless `plain` is empty.
    pub fn p(&mut self, html: Option<&str>, styles: &[(&str, &str)], plain: Option<&str>) -> &mut Self {
        if html.is_some() {
            self.p_start(styles);
        }
        self.text(html, plain);
        self.p_end(html.is_some(), plain.map_or(true, |p| !p.is_empty()))
    }

    pub fn span_start(&mut self, styles: &[(&str, &str)]) -> &mut Self {
        let html = format!("<span style=\"{}\">", self.style(Tag::Span, styles));
        self.html(&html)
    }

    pub fn span_end(&mut self) -> &mut Self {
        self.html("</span>")
    }

    pub fn span(&mut self, html: Option<&str>, styles: &[(&str, &str)], plain: Option<&str>) -> &mut Self {
        if html.is_some() {
            self.span_start(styles);
        }
        self.text(html, plain);
        if html.is_some() {
            self.span_end();
        }
        self
    }

    pub fn table_start(&mut self, styles: &[(&str, &str)]) -> &mut Self {
        let html = format!("<table style=\"{}\"><tbody>", self.style(Tag::Table, styles));
        self.html(&html)
    }

    pub fn table_end(&mut self) -> &mut Self {
        self.html("</tbody></table>")
    }

    pub fn tr_start(&mut self) -> &mut Self {
        self.html("<tr>")
    }

    pub fn tr_end(&mut self) -> &mut Self {
        self.html("</tr>")
    }

    pub fn td_start(&mut self, styles: &[(&str, &str)], attrs: &[(&str, &str)]) -> &mut Self {
        let html = format!(
            "<td style=\"{}\"{}>",
            self.style(Tag::Td, styles),
            attributes(attrs)
        );
        self.html(&html)
    }

    /// Close a cell; the plaintext side gets one newline.
    pub fn td_end(&mut self, use_html: bool, use_plain: bool) -> &mut Self {
        let (html, plain) = self.end_fragments("td", use_html, use_plain.then_some(1));
        self.store.append(html.as_deref(), plain.as_deref());
        self
    }

    pub fn td(&mut self, html: Option<&str>, styles: &[(&str, &str)], plain: Option<&str>) -> &mut Self {
        if html.is_some() {
            self.td_start(styles, &[]);
        }
        self.text(html, plain);
        self.td_end(html.is_some(), plain.map_or(true, |p| !p.is_empty()))
    }

    // ── Links and buttons ───────────────────────────────────────────────────

    pub fn a(&mut self, options: LinkOptions) -> &mut Self {
        let url = options.url.unwrap_or_else(|| self.config.site_url.clone());
        if options.use_plaintext {
            let label = options
                .plaintext_label
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or(&options.label);
            let line = plain_link(label, &url, &self.newline);
            self.store.append(None, Some(&line));
        }
        if options.use_html {
            let label = if self.encode {
                escape_html(&options.label)
            } else {
                options.label.clone()
            };
            let html = format!(
                "<a href=\"{}\" style=\"{}\">{label}</a>",
                wrap_url(&url),
                self.styles.resolve(Tag::A, &options.styles)
            );
            self.store.append(Some(&html), None);
        }
        self
    }

    pub fn btn(&mut self, options: ButtonOptions) -> &mut Self {
        let button = Button {
            url: options.url.unwrap_or_else(|| self.config.site_url.clone()),
            label: options.label,
            plaintext_label: options.plaintext_label.filter(|l| !l.is_empty()),
        };
        let layout = GroupLayout {
            align: options.align,
            width: options.width,
            use_html: options.use_html,
            use_plaintext: options.use_plaintext,
            ..GroupLayout::default()
        };
        let fragments = single_button(button, &layout, &self.button_theme());
        self.append_buttons(fragments)
    }

    /// Fails with `IndexOutOfRange` when `labels` is shorter than `urls`;
    /// nothing is appended in that case.
    pub fn btn_group(&mut self, options: ButtonGroupOptions) -> crate::Result<&mut Self> {
        let layout = GroupLayout {
            direction: options.direction,
            align: options.align,
            width: options.width,
            spacer_w: options.spacer_w,
            spacer_h: options.spacer_h,
            use_html: options.use_html,
            use_plaintext: options.use_plaintext,
        };
        let spec = ButtonGroupSpec::from_lists(
            &options.urls,
            &options.labels,
            &options.plaintext_labels,
            layout,
        )?;
        let fragments = button_group(&spec, &self.button_theme());
        Ok(self.append_buttons(fragments))
    }

    fn button_theme(&self) -> ButtonTheme<'_> {
        ButtonTheme {
            palette: &self.config.colors,
            border_radius: &self.config.border_radius,
            newline: &self.newline,
            escape: self.encode,
        }
    }

    fn append_buttons(&mut self, fragments: ButtonFragments) -> &mut Self {
        for plain in &fragments.plain {
            self.store.append(None, Some(plain));
        }
        if let Some(html) = &fragments.html {
            self.store.append(Some(html), None);
        }
        self
    }

    // ── Compile ─────────────────────────────────────────────────────────────

    /// Store the escaped subject for the document title and hand the raw
    /// subject to the transport.
    pub fn set_subject(&mut self, subject: &str) -> &mut Self {
        self.title = escape_html(subject);
        self.transport.set_subject(subject);
        self
    }

    /// Compile with the builder's renderer and hand both bodies to the
    /// transport.
    pub fn set_message(&mut self) -> crate::Result<&mut Self> {
        self.compile()?;
        Ok(self)
    }

    /// Like [`set_message`](Self::set_message) with a one-off renderer.
    pub fn set_message_with(&mut self, renderer: &dyn TemplateRenderer) -> crate::Result<&mut Self> {
        self.compile_with(renderer)?;
        Ok(self)
    }

    /// Re-derive both bodies from the current buffers. May be called any
    /// number of times.
    pub fn compile(&mut self) -> crate::Result<CompiledEmail> {
        let html = self.render_document(self.renderer.as_ref())?;
        Ok(self.finish_compile(html))
    }

    pub fn compile_with(&mut self, renderer: &dyn TemplateRenderer) -> crate::Result<CompiledEmail> {
        let html = self.render_document(renderer)?;
        Ok(self.finish_compile(html))
    }

    fn render_document(&self, renderer: &dyn TemplateRenderer) -> crate::Result<String> {
        let ctx = RenderContext {
            sections: SectionHtml {
                preheader: self.store.html(Section::Preheader),
                body: self.store.html(Section::Body),
                footer: self.store.html(Section::Footer),
            },
            colors: &self.config.colors,
            border_radius: &self.config.border_radius,
            title: &self.title,
        };
        renderer.render(&ctx)
    }

    fn finish_compile(&mut self, html: String) -> CompiledEmail {
        self.transport.set_message(&html);
        self.compiled.html = html;
        self.set_alt_message();
        tracing::debug!(
            html_len = self.compiled.html.len(),
            plain_len = self.compiled.plain.len(),
            "compiled message"
        );
        self.compiled.clone()
    }

    /// Join the plaintext sections in order and hand the result to the
    /// transport.
    pub fn set_alt_message(&mut self) -> &mut Self {
        let plain = self.join_plain();
        self.transport.set_alt_message(&plain);
        self.compiled.plain = plain;
        self
    }

    fn join_plain(&self) -> String {
        let glue = &self.config.plain_section_glue;
        let non_empty = self
            .store
            .iter()
            .map(|(_, buffers)| buffers.plain.as_str())
            .filter(|plain| !plain.is_empty());
        match self.config.glue_mode {
            GlueMode::Between => non_empty.collect::<Vec<_>>().join(glue),
            GlueMode::Legacy => {
                let mut out = String::new();
                for (i, plain) in non_empty.enumerate() {
                    out.push_str(plain);
                    if i + 1 != Section::ALL.len() - 1 {
                        out.push_str(glue);
                    }
                }
                out
            }
        }
    }

    /// Reset the cursor to the body and empty every buffer, the title and the
    /// compiled output. The config is kept. With `reset_transport` the
    /// transport's envelope and bodies are dropped too.
    pub fn clear(&mut self, reset_transport: bool) -> &mut Self {
        tracing::debug!(reset_transport, "clearing builder");
        self.store.clear();
        self.title.clear();
        self.compiled = CompiledEmail::default();
        if reset_transport {
            self.transport.clear();
        }
        self
    }

    // ── Transport forwarding ────────────────────────────────────────────────

    pub fn set_from(&mut self, from: &str) -> crate::Result<&mut Self> {
        self.transport.set_from(from)?;
        Ok(self)
    }

    pub fn set_to(&mut self, to: &str) -> crate::Result<&mut Self> {
        self.transport.set_to(to)?;
        Ok(self)
    }

    pub fn send(&mut self) -> crate::Result<()> {
        tracing::debug!("sending compiled message");
        self.transport.send()
    }
}
