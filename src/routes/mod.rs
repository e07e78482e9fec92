use blogicum_models::ITEMS_PER_PAGE;

pub struct Page {
    page: i32,
}

impl Page {
    pub fn first() -> Page {
        Page { page: 1 }
    }

    /// Pages are 1-based; anything below that is clamped back to the
    /// first page.
    pub fn of(page: Option<i32>) -> Page {
        Page {
            page: page.unwrap_or(1).max(1),
        }
    }

    pub fn number(&self) -> i32 {
        self.page
    }

    /// Computes the total number of pages needed to display n_items
    pub fn total(n_items: i32) -> i32 {
        if n_items % ITEMS_PER_PAGE == 0 {
            n_items / ITEMS_PER_PAGE
        } else {
            (n_items / ITEMS_PER_PAGE) + 1
        }
    }

    pub fn limits(&self) -> (i32, i32) {
        ((self.page - 1) * ITEMS_PER_PAGE, self.page * ITEMS_PER_PAGE)
    }
}

pub mod categories;
pub mod comments;
pub mod errors;
pub mod posts;
pub mod session;
pub mod user;

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn limits() {
        assert_eq!(Page::first().limits(), (0, 10));
        assert_eq!(Page::of(Some(3)).limits(), (20, 30));
        assert_eq!(Page::of(Some(-1)).limits(), (0, 10));
        assert_eq!(Page::of(None).limits(), (0, 10));
    }

    #[test]
    fn total() {
        assert_eq!(Page::total(0), 0);
        assert_eq!(Page::total(1), 1);
        assert_eq!(Page::total(10), 1);
        assert_eq!(Page::total(11), 2);
        assert_eq!(Page::total(25), 3);
    }
}
