use crate::differ::LineSequence;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File {} is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FileError::NotFound(path.to_path_buf())
        } else {
            FileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Read a whole file as strict UTF-8
pub fn read_text(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|e| FileError::from_io(path, e))?;
    String::from_utf8(bytes).map_err(|source| FileError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file and split it into lines
pub fn read_lines(path: &Path, keep_ends: bool) -> Result<LineSequence, FileError> {
    let text = read_text(path)?;
    let lines = if keep_ends {
        LineSequence::from_text_keep_ends(&text)
    } else {
        LineSequence::from_text(&text)
    };
    debug!("Read {} lines from {:?}", lines.len(), path);
    Ok(lines)
}

/// Read both sides of a comparison; either failure aborts the pair.
pub fn read_pair(
    cache: &mut FileCache,
    first: &Path,
    second: &Path,
    keep_ends: bool,
) -> Result<(Arc<LineSequence>, Arc<LineSequence>), FileError> {
    let first = cache.get_or_read(first, keep_ends)?;
    let second = cache.get_or_read(second, keep_ends)?;
    Ok((first, second))
}

type CacheKey = (PathBuf, bool);

struct CachedFile {
    modified: SystemTime,
    lines: Arc<LineSequence>,
}

/// Previously read files keyed by path, valid while the modification time is unchanged.
pub struct FileCache {
    capacity: usize,
    entries: HashMap<CacheKey, CachedFile>,
    // insertion order, oldest first
    order: VecDeque<CacheKey>,
}

impl FileCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get_or_read(
        &mut self,
        path: &Path,
        keep_ends: bool,
    ) -> Result<Arc<LineSequence>, FileError> {
        let canonical = fs::canonicalize(path).map_err(|e| FileError::from_io(path, e))?;
        let modified = fs::metadata(&canonical)
            .and_then(|meta| meta.modified())
            .map_err(|e| FileError::from_io(path, e))?;

        let key = (canonical, keep_ends);
        if let Some(cached) = self.entries.get(&key)
            && cached.modified == modified
        {
            debug!("Cache hit for {:?}", path);
            return Ok(Arc::clone(&cached.lines));
        }

        let lines = Arc::new(read_lines(&key.0, keep_ends)?);
        self.insert(key, modified, Arc::clone(&lines));
        Ok(lines)
    }

    fn insert(&mut self, key: CacheKey, modified: SystemTime, lines: Arc<LineSequence>) {
        if self
            .entries
            .insert(key.clone(), CachedFile { modified, lines })
            .is_some()
        {
            // refreshed in place; keep its original slot in the eviction order
            return;
        }

        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                debug!("Evicting {:?} from file cache", oldest.0);
                self.entries.remove(&oldest);
            }
        }
    }

    /// Drop every cached entry for `path`
    pub fn invalidate(&mut self, path: &Path) {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.entries.retain(|(p, _), _| p != &canonical);
        self.order.retain(|(p, _)| p != &canonical);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new(crate::constant::DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use uuid::Uuid;

    fn setup_test_dir() -> PathBuf {
        let test_dir = std::env::temp_dir().join(format!("test_files_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        test_dir
    }

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_read_lines() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("a.txt");
        fs::write(&path, "one\r\ntwo\n").unwrap();

        assert_eq!(read_lines(&path, false).unwrap().as_slice(), ["one", "two"]);
        assert_eq!(
            read_lines(&path, true).unwrap().as_slice(),
            ["one\r\n", "two\n"]
        );

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_read_errors() {
        let test_dir = setup_test_dir();

        let missing = test_dir.join("missing.txt");
        assert!(matches!(
            read_lines(&missing, false),
            Err(FileError::NotFound(p)) if p == missing
        ));

        let binary = test_dir.join("binary.bin");
        fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            read_lines(&binary, false),
            Err(FileError::Decode { .. })
        ));

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_cache_hits_until_mtime_changes() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("cached.txt");
        fs::write(&path, "old\n").unwrap();
        let original = SystemTime::now() - Duration::from_secs(60);
        set_mtime(&path, original);

        let mut cache = FileCache::new(4);
        let first = cache.get_or_read(&path, false).unwrap();
        assert_eq!(first.as_slice(), ["old"]);

        // same mtime: the cached copy is served
        fs::write(&path, "new\n").unwrap();
        set_mtime(&path, original);
        let second = cache.get_or_read(&path, false).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // mtime moved: re-read
        set_mtime(&path, original + Duration::from_secs(10));
        let third = cache.get_or_read(&path, false).unwrap();
        assert_eq!(third.as_slice(), ["new"]);
        assert_eq!(cache.len(), 1);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_cache_invalidate_and_evict() {
        let test_dir = setup_test_dir();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| {
                let path = test_dir.join(format!("{}.txt", i));
                fs::write(&path, format!("{}\n", i)).unwrap();
                path
            })
            .collect();

        let mut cache = FileCache::new(2);
        for path in &paths {
            cache.get_or_read(path, false).unwrap();
        }
        assert_eq!(cache.len(), 2);

        cache.get_or_read(&paths[2], true).unwrap();
        cache.invalidate(&paths[2]);
        assert_eq!(cache.len(), 0);

        cache.get_or_read(&paths[0], false).unwrap();
        cache.clear();
        assert!(cache.is_empty());

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_read_pair_fails_on_either_side() {
        let test_dir = setup_test_dir();
        let present = test_dir.join("present.txt");
        fs::write(&present, "x\n").unwrap();
        let missing = test_dir.join("missing.txt");

        let mut cache = FileCache::default();
        assert!(read_pair(&mut cache, &present, &missing, false).is_err());
        assert!(read_pair(&mut cache, &missing, &present, false).is_err());

        let (a, b) = read_pair(&mut cache, &present, &present, false).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        cleanup_test_dir(&test_dir);
    }
}
