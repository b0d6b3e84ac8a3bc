/// Environment variable with debug bitmask
pub const DEBUG_ENV: &str = "ADGRAPH_DEBUG";

/// Debug bitmask.
///
/// 1 - evaluation of nodes\
/// 2 - construction of derivative nodes\
/// 4 - sorting and caching of graphs\
/// 8 - graph registry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugMask(u32);

impl DebugMask {
    /// Create mask from raw bits
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// Read mask from `ADGRAPH_DEBUG`, returns None if unset or not a number
    pub fn from_env() -> Option<Self> {
        std::env::var(DEBUG_ENV)
            .ok()
            .and_then(|x| x.parse::<u32>().ok())
            .map(Self)
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Print every evaluated node
    pub const fn eval(self) -> bool {
        self.0 % 2 == 1
    }

    /// Print derivative construction
    pub const fn grad(self) -> bool {
        (self.0 >> 1) % 2 == 1
    }

    /// Print topological orders
    pub const fn sort(self) -> bool {
        (self.0 >> 2) % 2 == 1
    }

    /// Print registry lookups
    pub const fn registry(self) -> bool {
        (self.0 >> 3) % 2 == 1
    }
}

#[test]
fn bits() {
    let mask = DebugMask::new(0b1010);
    assert!(!mask.eval());
    assert!(mask.grad());
    assert!(!mask.sort());
    assert!(mask.registry());
}
