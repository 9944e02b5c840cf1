use std::fmt;
use std::str::FromStr;

use crate::MailweaveError;

/// One of the fixed regions of a message, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Inbox preview snippet. HTML only.
    Preheader,
    Body,
    Footer,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Preheader, Section::Body, Section::Footer];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Preheader => "preheader",
            Section::Body => "body",
            Section::Footer => "footer",
        }
    }

    fn index(self) -> usize {
        match self {
            Section::Preheader => 0,
            Section::Body => 1,
            Section::Footer => 2,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = MailweaveError;

    fn from_str(name: &str) -> crate::Result<Self> {
        match name {
            "preheader" => Ok(Section::Preheader),
            "body" => Ok(Section::Body),
            "footer" => Ok(Section::Footer),
            other => Err(MailweaveError::InvalidSection {
                name: other.to_string(),
            }),
        }
    }
}

/// HTML and plaintext accumulated for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBuffers {
    pub html: String,
    pub plain: String,
}

/// Owns the per-section buffers and the cursor all content is appended at.
#[derive(Debug, Clone)]
pub struct SectionStore {
    current: Section,
    buffers: [ContentBuffers; 3],
}

impl Default for SectionStore {
    fn default() -> Self {
        Self {
            current: Section::Body,
            buffers: Default::default(),
        }
    }
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    pub fn set_current(&mut self, section: Section) -> &mut Self {
        tracing::trace!(section = %section, "switching section");
        self.current = section;
        self
    }

    /// Select a section by name. An unknown name leaves the cursor untouched.
    pub fn set_current_by_name(&mut self, name: &str) -> crate::Result<&mut Self> {
        let section = name.parse::<Section>()?;
        Ok(self.set_current(section))
    }

    /// Append to the current section. Plaintext aimed at the preheader is
    /// dropped.
    pub fn append(&mut self, html: Option<&str>, plain: Option<&str>) -> &mut Self {
        let current = self.current;
        let buffers = &mut self.buffers[current.index()];
        if let Some(html) = html {
            buffers.html.push_str(html);
        }
        if let Some(plain) = plain {
            if current != Section::Preheader {
                buffers.plain.push_str(plain);
            }
        }
        self
    }

    /// Reset the cursor to the body and empty every buffer.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    pub fn buffers(&self, section: Section) -> &ContentBuffers {
        &self.buffers[section.index()]
    }

    pub fn html(&self, section: Section) -> &str {
        &self.buffers(section).html
    }

    pub fn plain(&self, section: Section) -> &str {
        &self.buffers(section).plain
    }

    /// Sections with their buffers, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &ContentBuffers)> {
        Section::ALL.into_iter().map(move |s| (s, self.buffers(s)))
    }
}
