use std::collections::BTreeSet;

/// Addresses the user follows. Client-local; never sent to the API.
///
/// Addresses compare case-insensitively since checksummed and lowercase
/// hex name the same account.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    addresses: BTreeSet<String>,
}

impl Watchlist {
    pub fn follow(&mut self, address: &str) -> bool {
        self.addresses.insert(address.to_ascii_lowercase())
    }

    pub fn unfollow(&mut self, address: &str) -> bool {
        self.addresses.remove(&address.to_ascii_lowercase())
    }

    pub fn is_following(&self, address: &str) -> bool {
        self.addresses.contains(&address.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_is_case_insensitive() {
        let mut list = Watchlist::default();
        assert!(list.follow("0x742d35Cc6634C0532925a3b8D4C9db96590c6C87"));
        assert!(!list.follow("0x742d35cc6634c0532925a3b8d4c9db96590c6c87"));
        assert!(list.is_following("0x742D35CC6634C0532925A3B8D4C9DB96590C6C87"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_unfollow() {
        let mut list = Watchlist::default();
        list.follow("0xabc");
        assert!(list.unfollow("0xABC"));
        assert!(!list.unfollow("0xabc"));
        assert!(list.is_empty());
    }
}
