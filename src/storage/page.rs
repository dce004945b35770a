pub const PAGE_SIZE: usize = 8192;

/// Position of a record inside a [`PageStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId {
    pub page_id: usize,
    pub slot: usize,
}

/// A fixed-size block of record slots.
#[derive(Debug, Clone)]
pub struct Page {
    pub data: Box<[u8]>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            data: vec![0; PAGE_SIZE].into_boxed_slice(),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only storage of fixed-width records for one table.
///
/// Records never straddle a page: each page holds `PAGE_SIZE / record_size`
/// slots and pages are allocated lazily up to `max_pages`.
#[derive(Debug, Clone)]
pub struct PageStore {
    record_size: usize,
    max_pages: usize,
    pages: Vec<Page>,
    record_count: usize,
}

impl PageStore {
    /// Creates an empty store. `record_size` must be between 1 and [`PAGE_SIZE`].
    pub fn new(record_size: usize, max_pages: usize) -> Self {
        debug_assert!(record_size > 0 && record_size <= PAGE_SIZE);

        Self {
            record_size,
            max_pages,
            pages: Vec::new(),
            record_count: 0,
        }
    }

    pub fn records_per_page(&self) -> usize {
        PAGE_SIZE / self.record_size
    }

    pub fn capacity(&self) -> usize {
        self.records_per_page() * self.max_pages
    }

    pub fn len(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn locate(&self, index: usize) -> RecordId {
        let per_page = self.records_per_page();
        RecordId {
            page_id: index / per_page,
            slot: index % per_page,
        }
    }

    /// Appends a record, returning where it landed, or `None` when the
    /// store is full.
    pub fn append(&mut self, record: &[u8]) -> Option<RecordId> {
        debug_assert_eq!(record.len(), self.record_size);

        if self.record_count >= self.capacity() {
            return None;
        }

        let id = self.locate(self.record_count);
        if id.page_id == self.pages.len() {
            self.pages.push(Page::new());
        }

        let offset = id.slot * self.record_size;
        self.pages[id.page_id].data[offset..offset + self.record_size].copy_from_slice(record);
        self.record_count += 1;

        Some(id)
    }

    /// Returns the record stored at `index` (insertion order).
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.record_count {
            return None;
        }

        let id = self.locate(index);
        let offset = id.slot * self.record_size;
        Some(&self.pages[id.page_id].data[offset..offset + self.record_size])
    }

    /// Keeps only the records for which `keep(index)` is true, returning how
    /// many were removed.
    ///
    /// Survivors are moved down so they stay contiguous and in insertion
    /// order; pages left without records are released.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut kept = 0;
        for index in 0..self.record_count {
            if !keep(index) {
                continue;
            }

            if kept != index {
                let from = self.locate(index);
                let to = self.locate(kept);
                let (from_offset, to_offset) = (from.slot * self.record_size, to.slot * self.record_size);

                if from.page_id == to.page_id {
                    self.pages[from.page_id]
                        .data
                        .copy_within(from_offset..from_offset + self.record_size, to_offset);
                } else {
                    // `to` always sits on an earlier page than `from`.
                    let (head, tail) = self.pages.split_at_mut(from.page_id);
                    head[to.page_id].data[to_offset..to_offset + self.record_size]
                        .copy_from_slice(&tail[0].data[from_offset..from_offset + self.record_size]);
                }
            }
            kept += 1;
        }

        let removed = self.record_count - kept;
        self.record_count = kept;
        self.pages.truncate(kept.div_ceil(self.records_per_page()));
        removed
    }

    /// Iterates every record in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.record_count).filter_map(move |index| self.get(index))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn test_append_and_get() {
        let mut store = PageStore::new(4, 2);

        let first = store.append(&[1, 2, 3, 4]).unwrap();
        let second = store.append(&[5, 6, 7, 8]).unwrap();

        assert_eq!(first, RecordId { page_id: 0, slot: 0 });
        assert_eq!(second, RecordId { page_id: 0, slot: 1 });
        assert_eq!(store.get(0), Some(&[1, 2, 3, 4][..]));
        assert_eq!(store.get(1), Some(&[5, 6, 7, 8][..]));
        assert_eq!(store.get(2), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    pub fn test_records_cross_pages_in_order() {
        // Two records per page.
        let mut store = PageStore::new(PAGE_SIZE / 2, 3);

        for byte in 0..5u8 {
            store.append(&vec![byte; PAGE_SIZE / 2]).unwrap();
        }

        assert_eq!(store.page_count(), 3);
        let firsts: Vec<u8> = store.records().map(|record| record[0]).collect();
        assert_eq!(firsts, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    pub fn test_full_store_rejects_append() {
        let mut store = PageStore::new(PAGE_SIZE, 1);

        assert!(store.append(&vec![7; PAGE_SIZE]).is_some());
        assert!(store.append(&vec![8; PAGE_SIZE]).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.capacity(), 1);
    }

    #[test]
    pub fn test_retain_compacts_across_pages() {
        // Two records per page, five records on three pages.
        let mut store = PageStore::new(PAGE_SIZE / 2, 3);
        for byte in 0..5u8 {
            store.append(&vec![byte; PAGE_SIZE / 2]).unwrap();
        }

        let removed = store.retain(|index| index % 2 == 0);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 3);
        assert_eq!(store.page_count(), 2);

        let firsts: Vec<u8> = store.records().map(|record| record[0]).collect();
        assert_eq!(firsts, vec![0, 2, 4]);
        assert!(store.records().all(|record| record.iter().all(|b| *b == record[0])));

        // Freed slots are reused.
        store.append(&vec![9; PAGE_SIZE / 2]).unwrap();
        let firsts: Vec<u8> = store.records().map(|record| record[0]).collect();
        assert_eq!(firsts, vec![0, 2, 4, 9]);
    }

    #[test]
    pub fn test_retain_nothing_empties_the_store() {
        let mut store = PageStore::new(4, 1);
        assert_eq!(store.retain(|_| false), 0);

        store.append(&[1, 1, 1, 1]).unwrap();
        store.append(&[2, 2, 2, 2]).unwrap();

        assert_eq!(store.retain(|_| false), 2);
        assert!(store.is_empty());
        assert_eq!(store.page_count(), 0);
        assert_eq!(store.records().count(), 0);
    }
}
