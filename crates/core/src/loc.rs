//! Field locations: where in a request a value came from.

use serde::Serialize;

/// Request part a parameter is read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Body,
    Form,
    File,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Body => "body",
            Location::Form => "form",
            Location::File => "file",
        }
    }
}

/// One step of a location: an object key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Full location of a field, e.g. `["body", "items", 0, "images", 1, "url"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Loc(Vec<Segment>);

impl Loc {
    /// Empty location, used only when nothing more specific is known.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn at(location: Location) -> Self {
        Self(vec![Segment::Key(location.as_str().to_string())])
    }

    pub fn path(name: &str) -> Self {
        Self::at(Location::Path).key(name)
    }

    pub fn query(name: &str) -> Self {
        Self::at(Location::Query).key(name)
    }

    pub fn form(name: &str) -> Self {
        Self::at(Location::Form).key(name)
    }

    pub fn file(name: &str) -> Self {
        Self::at(Location::File).key(name)
    }

    pub fn body() -> Self {
        Self::at(Location::Body)
    }

    /// Child location under an object key.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.to_string()));
        Self(segments)
    }

    /// Child location under a list index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl core::fmt::Display for Loc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_locations_serialize_as_mixed_list() {
        let loc = Loc::body().key("items").index(0).key("images").index(1).key("url");
        assert_eq!(
            serde_json::to_value(&loc).unwrap(),
            json!(["body", "items", 0, "images", 1, "url"])
        );
        assert_eq!(loc.to_string(), "body.items[0].images[1].url");
    }

    #[test]
    fn child_locations_do_not_mutate_parent() {
        let parent = Loc::body();
        let _child = parent.key("name");
        assert_eq!(parent.segments().len(), 1);
    }
}
