use super::path_list::PathList;

/// State that outlives a single input line.
///
/// The working directory is not stored here: it belongs to the process and
/// is changed in place by `cd`, so children inherit it at fork time.
#[derive(Debug, Default)]
pub struct Session {
    paths: PathList,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths(paths: PathList) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PathList {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut PathList {
        &mut self.paths
    }
}
