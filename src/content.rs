//! Content shown when an object is clicked.
//!
//! Pure data: the engine never renders it. A host maps the group id it
//! receives from the click callback to a [`ContentSection`] via
//! [`ContentCatalog::get`] and presents the slides however it likes. The
//! catalog keeps insertion order so hosts can page through sections.

/// One page of a section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slide {
    pub title: String,
    /// Paragraphs in display order.
    pub text: Vec<String>,
    /// Description of the picture to show when no image is available.
    pub image_placeholder: Option<String>,
    /// Path or URL of the picture.
    pub image: Option<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn image_placeholder(mut self, description: impl Into<String>) -> Self {
        self.image_placeholder = Some(description.into());
        self
    }
}

/// The content behind one clickable object, keyed by its group id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentSection {
    pub id: String,
    pub title: String,
    pub slides: Vec<Slide>,
}

impl ContentSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slides: Vec::new(),
        }
    }

    pub fn slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    sections: Vec<ContentSection>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `section`, replacing an existing section with the same id in place.
    pub fn insert(&mut self, section: ContentSection) {
        match self.position(&section.id) {
            Some(i) => self.sections[i] = section,
            None => self.sections.push(section),
        }
    }

    pub fn with(mut self, section: ContentSection) -> Self {
        self.insert(section);
        self
    }

    pub fn get(&self, group_id: &str) -> Option<&ContentSection> {
        self.position(group_id).map(|i| &self.sections[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentSection> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The section after `group_id`, wrapping around at the end.
    pub fn next(&self, group_id: &str) -> Option<&ContentSection> {
        let i = self.position(group_id)?;
        self.sections.get((i + 1) % self.sections.len())
    }

    /// The section before `group_id`, wrapping around at the start.
    pub fn previous(&self, group_id: &str) -> Option<&ContentSection> {
        let i = self.position(group_id)?;
        let len = self.sections.len();
        self.sections.get((i + len - 1) % len)
    }

    fn position(&self, group_id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == group_id)
    }
}
