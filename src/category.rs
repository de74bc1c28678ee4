// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Log categories.
//!
//! A category is a compile-time tag attached to every log line, printed as `[Name]` in front of
//! the message and used to switch groups of messages on and off at run time.
//!
//! The built-in table is [`LogType`]. Other tables are declared with [`log_types!`]:
//!
//! ```
//! tt_logger::log_types! {
//!     /// Categories of my service.
//!     pub enum ServiceLog {
//!         Always,
//!         Http,
//!         Storage,
//!     }
//! }
//!
//! use tt_logger::Category;
//!
//! assert_eq!(ServiceLog::Storage.name(), "Storage");
//! assert_eq!("Http".parse::<ServiceLog>().unwrap(), ServiceLog::Http);
//! ```

use std::fmt;

/// The largest number of categories a table may declare; one bit each in a [`CategoryMask`].
pub const MAX_CATEGORIES: usize = 64;

/// The name reported for an index outside of a category table.
pub const UNKNOWN_CATEGORY: &str = "UnknownType";

/// The category that is never filtered out by [`CategoryMask::from_spec`].
pub const ALWAYS: &str = "Always";

/// A table of log categories.
///
/// Implemented by [`LogType`] and by every enum declared with [`log_types!`].
pub trait Category: Copy + fmt::Debug + Send + Sync + 'static {
    /// Names of all categories, indexed by [`Category::index`].
    const NAMES: &'static [&'static str];

    /// All categories, in declaration order.
    const ALL: &'static [Self];

    /// The position of this category in the table.
    fn index(self) -> usize;

    /// The name of this category.
    fn name(self) -> &'static str {
        category_name(Self::NAMES, self.index())
    }
}

/// Look up the name at `index`, or [`UNKNOWN_CATEGORY`] if the table is shorter.
pub fn category_name(names: &[&'static str], index: usize) -> &'static str {
    names.get(index).copied().unwrap_or(UNKNOWN_CATEGORY)
}

/// Parse a category by its exact name.
pub fn parse_category<C: Category>(s: &str) -> Result<C, UnknownCategory> {
    C::ALL
        .iter()
        .copied()
        .find(|c| c.name() == s)
        .ok_or_else(|| UnknownCategory(s.to_owned()))
}

/// The error returned when a string names no category of a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log category `{0}`")]
pub struct UnknownCategory(String);

/// Declare a category table.
///
/// The enum gets `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, [`Category`], `Display`
/// and `FromStr`. Declaring more than [`MAX_CATEGORIES`] variants fails to compile.
///
/// Name the first variant `Always` to keep the behavior of the built-in table, where `Always`
/// survives every category filter and shares its mask bit with the macros' default category.
///
/// Filter values are matched by substring, see [`CategoryMask::from_spec`]. Avoid variant names
/// that contain `All`, such as `Allocator`: naming one in a filter enables every category.
#[macro_export]
macro_rules! log_types {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::Category for $name {
            const NAMES: &'static [&'static str] = &[$(::core::stringify!($variant)),+];
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn index(self) -> usize {
                self as usize
            }
        }

        const _: () = ::core::assert!(
            <$name as $crate::Category>::ALL.len() <= $crate::category::MAX_CATEGORIES,
            "too many log categories"
        );

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad($crate::Category::name(*self))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::category::UnknownCategory;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::category::parse_category(s)
            }
        }
    };
}

log_types! {
    /// The built-in log categories.
    ///
    /// [`LogType::Always`] is the category of messages logged without one.
    pub enum LogType {
        Always,
        Test,
        Timer,
        Device,
        LLRuntime,
        Loader,
        BuildKernels,
        Verif,
        Op,
        Dispatch,
        Fabric,
        Metal,
        TTNN,
        MetalTrace,
        SiliconDriver,
        EmulationDriver,
    }
}

/// A set of enabled categories, one bit per [`Category::index`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryMask(u64);

impl CategoryMask {
    /// Every category enabled.
    pub const fn all() -> Self {
        CategoryMask(u64::MAX)
    }

    /// No category enabled.
    pub const fn none() -> Self {
        CategoryMask(0)
    }

    /// Build a mask from raw bits.
    pub const fn from_bits(bits: u64) -> Self {
        CategoryMask(bits)
    }

    /// The raw bits of the mask.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// This mask with the category at `index` enabled. Indices past [`MAX_CATEGORIES`] are
    /// ignored.
    #[must_use]
    pub const fn with(self, index: usize) -> Self {
        if index < MAX_CATEGORIES {
            CategoryMask(self.0 | (1 << index))
        } else {
            self
        }
    }

    /// This mask with the category at `index` disabled.
    #[must_use]
    pub const fn without(self, index: usize) -> Self {
        if index < MAX_CATEGORIES {
            CategoryMask(self.0 & !(1 << index))
        } else {
            self
        }
    }

    /// Whether the category at `index` is enabled.
    #[inline]
    pub const fn contains(self, index: usize) -> bool {
        index < MAX_CATEGORIES && self.0 & (1 << index) != 0
    }

    /// Build the mask described by a category filter value.
    ///
    /// * An empty value enables everything.
    /// * A value containing `All` enables everything, including a value naming a category whose
    ///   name contains `All`.
    /// * Otherwise a category is enabled when its name occurs anywhere in `value`, so
    ///   `"Device,Op"` enables `Device` and `Op`. Matching is by substring: `"MetalTrace"` also
    ///   enables `Metal`.
    ///
    /// The category named [`ALWAYS`] is enabled in every case.
    pub fn from_spec(names: &[&str], value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.contains("All") {
            return CategoryMask::all();
        }

        names
            .iter()
            .enumerate()
            .filter(|(_, name)| **name == ALWAYS || value.contains(**name))
            .fold(CategoryMask::none(), |mask, (index, _)| mask.with(index))
    }

    /// The names in `names` this mask enables.
    pub fn enabled_names<'a>(self, names: &[&'a str]) -> Vec<&'a str> {
        names
            .iter()
            .enumerate()
            .filter(|(index, _)| self.contains(*index))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for CategoryMask {
    fn default() -> Self {
        CategoryMask::all()
    }
}

impl fmt::Debug for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryMask({:#018x})", self.0)
    }
}
