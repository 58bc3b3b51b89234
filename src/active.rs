/// The set of clusters still alive during linkage, identified by matrix slot.
///
/// Removal is constant time and iteration visits only live slots, in ascending order.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSet {
    alive: Vec<bool>,
    next: Vec<usize>,
    prev: Vec<usize>,
    head: usize,
    len: usize,
}

impl ActiveSet {
    pub(crate) fn new(n_slots: usize) -> Self {
        let sentinel = n_slots;
        ActiveSet {
            alive: vec![true; n_slots],
            next: (1..=n_slots).collect(),
            prev: (0..n_slots).map(|i| if i == 0 { sentinel } else { i - 1 }).collect(),
            head: if n_slots > 0 { 0 } else { sentinel },
            len: n_slots,
        }
    }

    pub(crate) fn contains(&self, slot: usize) -> bool {
        self.alive[slot]
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn first(&self) -> Option<usize> {
        self.link(self.head)
    }

    /// Permanently retires a slot. Removing a dead slot does nothing.
    pub(crate) fn remove(&mut self, slot: usize) {
        if !self.alive[slot] {
            return;
        }
        self.alive[slot] = false;
        self.len -= 1;

        let (prev, next) = (self.prev[slot], self.next[slot]);
        if prev == self.sentinel() {
            self.head = next;
        } else {
            self.next[prev] = next;
        }
        if next != self.sentinel() {
            self.prev[next] = prev;
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.first(), move |&slot| self.link(self.next[slot]))
    }

    fn sentinel(&self) -> usize {
        self.alive.len()
    }

    fn link(&self, slot: usize) -> Option<usize> {
        if slot == self.sentinel() {
            None
        } else {
            Some(slot)
        }
    }
}
