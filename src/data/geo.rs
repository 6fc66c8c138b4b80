//! City coordinates for placing map markers.
//!
//! Marker positions come from a fixed lookup table of city centres. A city
//! that is not in the table is reported as unplaced rather than drawn at an
//! invented position.

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// City centres, lowercase name first. Alternate spellings share coordinates.
const CITIES: &[(&str, f64, f64)] = &[
    ("agra", 27.1767, 78.0081),
    ("ahmedabad", 23.0225, 72.5714),
    ("amritsar", 31.6340, 74.8723),
    ("bangalore", 12.9716, 77.5946),
    ("bengaluru", 12.9716, 77.5946),
    ("bhopal", 23.2599, 77.4126),
    ("bhubaneswar", 20.2961, 85.8245),
    ("bombay", 19.0760, 72.8777),
    ("calcutta", 22.5726, 88.3639),
    ("chandigarh", 30.7333, 76.7794),
    ("chennai", 13.0827, 80.2707),
    ("coimbatore", 11.0168, 76.9558),
    ("dehradun", 30.3165, 78.0322),
    ("delhi", 28.6139, 77.2090),
    ("ghaziabad", 28.6692, 77.4538),
    ("gurgaon", 28.4595, 77.0266),
    ("gurugram", 28.4595, 77.0266),
    ("guwahati", 26.1445, 91.7362),
    ("hyderabad", 17.3850, 78.4867),
    ("indore", 22.7196, 75.8577),
    ("jaipur", 26.9124, 75.7873),
    ("kanpur", 26.4499, 80.3319),
    ("kochi", 9.9312, 76.2673),
    ("kolkata", 22.5726, 88.3639),
    ("lucknow", 26.8467, 80.9462),
    ("madras", 13.0827, 80.2707),
    ("mumbai", 19.0760, 72.8777),
    ("nagpur", 21.1458, 79.0882),
    ("new delhi", 28.6139, 77.2090),
    ("noida", 28.5355, 77.3910),
    ("patna", 25.5941, 85.1376),
    ("pune", 18.5204, 73.8567),
    ("raipur", 21.2514, 81.6296),
    ("ranchi", 23.3441, 85.3096),
    ("surat", 21.1702, 72.8311),
    ("thiruvananthapuram", 8.5241, 76.9366),
    ("varanasi", 25.3176, 82.9739),
    ("visakhapatnam", 17.6868, 83.2185),
];

/// Look up a city's coordinates (case-insensitive).
pub fn lookup(city: &str) -> Option<GeoPoint> {
    let key = city.trim().to_lowercase();
    CITIES
        .binary_search_by(|(name, _, _)| name.cmp(&key.as_str()))
        .ok()
        .map(|i| GeoPoint::new(CITIES[i].1, CITIES[i].2))
}

/// Longitude/latitude bounds of the map canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub lon: [f64; 2],
    pub lat: [f64; 2],
}

impl Viewport {
    /// Region shown when no city can be placed.
    pub const INDIA: Viewport = Viewport {
        lon: [66.0, 98.0],
        lat: [6.0, 37.0],
    };

    /// Degrees added around the outermost markers.
    const PADDING: f64 = 3.0;
    /// Smallest span on either axis, so a single city still shows its surroundings.
    const MIN_SPAN: f64 = 12.0;

    /// Fit all points with padding, falling back to [`Viewport::INDIA`].
    pub fn fit<I>(points: I) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::INDIA;
        };

        let (mut lon_min, mut lon_max) = (first.lon, first.lon);
        let (mut lat_min, mut lat_max) = (first.lat, first.lat);
        for p in iter {
            lon_min = lon_min.min(p.lon);
            lon_max = lon_max.max(p.lon);
            lat_min = lat_min.min(p.lat);
            lat_max = lat_max.max(p.lat);
        }

        Self {
            lon: widen(lon_min, lon_max, -180.0, 180.0),
            lat: widen(lat_min, lat_max, -90.0, 90.0),
        }
    }

    /// Width of the viewport in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.lon[1] - self.lon[0]
    }
}

fn widen(min: f64, max: f64, floor: f64, ceil: f64) -> [f64; 2] {
    let mut lo = min - Viewport::PADDING;
    let mut hi = max + Viewport::PADDING;
    let short = Viewport::MIN_SPAN - (hi - lo);
    if short > 0.0 {
        lo -= short / 2.0;
        hi += short / 2.0;
    }
    [lo.max(floor), hi.min(ceil)]
}
