use std::collections::HashMap;

use crate::error::{AdServiceError, Result};
use crate::types::Ad;

/// Immutable category → ads mapping, built once at startup.
///
/// Categories keep the order in which they first appear in the input pairs,
/// and ads keep their insertion order within a category. [`Catalog::all_ads`]
/// is precomputed so random sampling never has to walk the map.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<(String, Vec<Ad>)>,
    index: HashMap<String, usize>,
    all: Vec<Ad>,
}

impl Catalog {
    /// Build a catalog from literal `(category, ad)` pairs.
    ///
    /// Repeated categories accumulate. An empty input is rejected because the
    /// random fallback needs at least one ad to sample from.
    pub fn build<I, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, Ad)>,
        C: Into<String>,
    {
        let mut categories: Vec<(String, Vec<Ad>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (category, ad) in pairs {
            let category = category.into();
            match index.get(&category) {
                Some(&i) => categories[i].1.push(ad),
                None => {
                    index.insert(category.clone(), categories.len());
                    categories.push((category, vec![ad]));
                }
            }
        }

        if categories.is_empty() {
            return Err(AdServiceError::EmptyCatalog);
        }

        let all = categories
            .iter()
            .flat_map(|(_, ads)| ads.iter().cloned())
            .collect();

        Ok(Self {
            categories,
            index,
            all,
        })
    }

    /// Ads for `category`, or an empty slice when the category is unknown.
    pub fn lookup(&self, category: &str) -> &[Ad] {
        self.index
            .get(category)
            .map(|&i| self.categories[i].1.as_slice())
            .unwrap_or(&[])
    }

    /// Every ad, in category declaration order then insertion order.
    pub fn all_ads(&self) -> &[Ad] {
        &self.all
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// `(category, ads)` entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Ad])> {
        self.categories
            .iter()
            .map(|(name, ads)| (name.as_str(), ads.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// The catalog the service ships with.
///
/// `books` deliberately has no ads so the random fallback is exercised by
/// ordinary traffic.
pub fn default_catalog() -> Result<Catalog> {
    let binoculars = Ad::new("/product/2ZYFJ3GM2N", "Roof Binoculars for sale. 50% off.");
    let explorer_telescope = Ad::new(
        "/product/66VCHSJNUP",
        "Starsense Explorer Refractor Telescope for sale. 20% off.",
    );
    let color_imager = Ad::new(
        "/product/0PUK6V6EV0",
        "Solar System Color Imager for sale. 30% off.",
    );
    let optical_tube = Ad::new(
        "/product/9SIQT8TOJO",
        "Optical Tube Assembly for sale. 10% off.",
    );
    let travel_telescope = Ad::new(
        "/product/1YMWWN1N4O",
        "Eclipsmart Travel Refractor Telescope for sale. Buy one, get second kit for free",
    );
    let solar_filter = Ad::new(
        "/product/6E92ZMYYFZ",
        "Solar Filter for sale. Buy two, get third one for free",
    );
    let cleaning_kit = Ad::new(
        "/product/L9ECAV7KIM",
        "Lens Cleaning Kit for sale. Buy one, get second one for free",
    );

    Catalog::build([
        ("binoculars", binoculars),
        ("telescopes", explorer_telescope),
        ("accessories", color_imager),
        ("accessories", solar_filter),
        ("accessories", cleaning_kit),
        ("assembly", optical_tube),
        ("travel", travel_telescope),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(n: u32) -> Ad {
        Ad::new(format!("/product/{n}"), format!("ad {n}"))
    }

    #[test]
    fn build_rejects_empty_input() {
        let pairs: Vec<(String, Ad)> = Vec::new();
        let err = Catalog::build(pairs).unwrap_err();
        assert!(matches!(err, AdServiceError::EmptyCatalog));
    }

    #[test]
    fn lookup_unknown_category_is_empty() {
        let catalog = Catalog::build([("binoculars", ad(1))]).unwrap();
        assert!(catalog.lookup("nonexistent").is_empty());
    }

    #[test]
    fn repeated_category_keeps_insertion_order() {
        let catalog =
            Catalog::build([("a", ad(1)), ("b", ad(2)), ("a", ad(3)), ("a", ad(4))]).unwrap();
        assert_eq!(catalog.lookup("a"), &[ad(1), ad(3), ad(4)]);
        assert_eq!(catalog.lookup("b"), &[ad(2)]);
    }

    #[test]
    fn all_ads_follows_category_declaration_order() {
        let catalog =
            Catalog::build([("a", ad(1)), ("b", ad(2)), ("a", ad(3))]).unwrap();
        assert_eq!(catalog.all_ads(), &[ad(1), ad(3), ad(2)]);
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn default_catalog_contents() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.len(), 7);
        assert_eq!(
            catalog.categories().collect::<Vec<_>>(),
            vec!["binoculars", "telescopes", "accessories", "assembly", "travel"]
        );
        assert_eq!(catalog.lookup("accessories").len(), 3);
        assert_eq!(
            catalog.lookup("accessories")[1].redirect_url,
            "/product/6E92ZMYYFZ"
        );
        assert!(catalog.lookup("books").is_empty());
    }
}
