//! Static page content: the catalog, featured packages, testimonials, map
//! locations, hero taglines and the search schema table.
//!
//! Everything here is plain data. Components receive it at construction.

use crate::form::{FieldDescriptor, FormSchema, SelectOption, TabSchema};
use crate::money::Money;
use crate::types::{
    Category, Localized, Location, LocationKind, Package, PriceUnit, Service, ServiceStats, TabId,
    Testimonial,
};
use crate::{DEFAULT_FLIGHT_GUESTS, MAX_GUESTS, MIN_GUESTS};

const UNSPLASH: &str = "https://images.unsplash.com";

fn image(id: &str) -> String {
    format!("{UNSPLASH}/{id}?ixlib=rb-4.0.3")
}

// =============================================================================
// Hero
// =============================================================================

pub fn taglines() -> Vec<Localized> {
    vec![
        Localized::new("Discover Luxury Beyond Imagination", "اكتشف الفخامة بلا حدود"),
        Localized::new(
            "Experience Dubai Like Never Before",
            "اختبر دبي كما لم تختبرها من قبل",
        ),
        Localized::new("Your Gateway to Premium Adventures", "بوابتك للمغامرات المميزة"),
    ]
}

// =============================================================================
// Service Catalog
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn service(
    id: u32,
    category: Category,
    title: Localized,
    description: Localized,
    price_dollars: i64,
    price_unit: PriceUnit,
    bookings: u64,
    rating_tenths: u8,
    image_id: &str,
) -> Service {
    Service {
        id,
        category,
        title,
        description,
        price_from: Money::from_major_minor(price_dollars, 0),
        price_unit,
        stats: ServiceStats {
            bookings,
            rating_tenths,
        },
        image: image(image_id),
    }
}

pub fn services() -> Vec<Service> {
    vec![
        service(
            1,
            Category::Travel,
            Localized::new("Flight Booking", "حجز الطيران"),
            Localized::new(
                "Premium flight experiences with exclusive cabin upgrades and priority boarding",
                "تجارب طيران مميزة مع ترقيات المقصورة الحصرية والصعود ذو الأولوية",
            ),
            299,
            PriceUnit::Flat,
            15_420,
            49,
            "photo-1436491865332-7a61a109cc05",
        ),
        service(
            2,
            Category::Transport,
            Localized::new("Luxury Car Rental", "تأجير السيارات الفاخرة"),
            Localized::new(
                "Drive premium vehicles from Lamborghini, Ferrari, and Rolls Royce",
                "قد السيارات المميزة من لامبورغيني وفيراري ورولز رويس",
            ),
            150,
            PriceUnit::PerDay,
            8_930,
            48,
            "photo-1493238792000-8113da705763",
        ),
        service(
            3,
            Category::Accommodation,
            Localized::new("Villa Reservations", "حجز الفيلات"),
            Localized::new(
                "Exclusive villas with private pools, beach access, and concierge service",
                "فيلات حصرية مع مسابح خاصة ووصول للشاطئ وخدمة الكونسيرج",
            ),
            500,
            PriceUnit::PerNight,
            5_670,
            49,
            "photo-1512917774080-9991f1c4c750",
        ),
        service(
            4,
            Category::Entertainment,
            Localized::new("Nightlife Experience", "تجربة الحياة الليلية"),
            Localized::new(
                "VIP access to Dubai's hottest clubs and rooftop bars",
                "وصول كبار الشخصيات لأشهر النوادي والبارات في دبي",
            ),
            80,
            PriceUnit::Flat,
            12_340,
            47,
            "photo-1566737236500-c8ac43014a8e",
        ),
        service(
            5,
            Category::Technology,
            Localized::new("Travel eSIM", "شريحة السفر الإلكترونية"),
            Localized::new(
                "Stay connected with high-speed internet across 100+ countries",
                "ابق متصلاً بالإنترنت عالي السرعة في أكثر من 100 دولة",
            ),
            15,
            PriceUnit::Flat,
            23_450,
            46,
            "photo-1588508065123-287b28e013da",
        ),
        service(
            6,
            Category::Travel,
            Localized::new("Beach Packages", "حزم الشاطئ"),
            Localized::new(
                "All-inclusive beach resort packages with water sports and spa",
                "حزم منتجع الشاطئ الشاملة مع الرياضات المائية والسبا",
            ),
            200,
            PriceUnit::PerDay,
            9_876,
            48,
            "photo-1507525428034-b723cf961d3e",
        ),
    ]
}

/// Label of a filter button.
pub fn category_label(category: Option<Category>) -> Localized {
    match category {
        None => Localized::new("All Services", "جميع الخدمات"),
        Some(Category::Travel) => Localized::new("Travel", "السفر"),
        Some(Category::Transport) => Localized::new("Transport", "النقل"),
        Some(Category::Accommodation) => Localized::new("Stay", "الإقامة"),
        Some(Category::Entertainment) => Localized::new("Entertainment", "الترفيه"),
        Some(Category::Technology) => Localized::new("Technology", "التكنولوجيا"),
    }
}

// =============================================================================
// Featured Packages
// =============================================================================

pub fn packages() -> Vec<Package> {
    vec![Package {
        id: 1,
        title: Localized::new("Luxury Dubai Experience", "تجربة دبي الفاخرة"),
        description: Localized::new(
            "A comprehensive 7-day luxury package including 5-star accommodation, private tours \
             of iconic landmarks, fine dining experiences, and exclusive access to premium venues.",
            "باقة فاخرة شاملة لمدة 7 أيام تتضمن إقامة فندقية 5 نجوم وجولات خاصة في المعالم \
             الشهيرة وتجارب طعام راقية ووصولاً حصرياً إلى أرقى الأماكن.",
        ),
        price: Money::from_major_minor(2999, 0),
        duration: Localized::new("7 Days / 6 Nights", "7 أيام / 6 ليال"),
        rating_tenths: 49,
        reviews: 156,
        image: image("photo-1512453979798-5ea266f8880c"),
        highlights: vec![
            Localized::new(
                "Private tour of Burj Khalifa and Dubai Mall",
                "جولة خاصة في برج خليفة ودبي مول",
            ),
            Localized::new(
                "Luxury desert safari with fine dining",
                "رحلة سفاري صحراوية فاخرة مع عشاء راق",
            ),
            Localized::new(
                "Yacht cruise around Palm Jumeirah",
                "رحلة يخت حول نخلة جميرا",
            ),
            Localized::new(
                "VIP access to premium shopping districts",
                "دخول كبار الشخصيات إلى مناطق التسوق الراقية",
            ),
        ],
        included: vec![
            Localized::new("5-star hotel accommodation", "إقامة في فندق 5 نجوم"),
            Localized::new("Private transfers", "تنقلات خاصة"),
            Localized::new("Daily breakfast", "إفطار يومي"),
            Localized::new("Professional guide", "مرشد محترف"),
            Localized::new("All entrance fees", "جميع رسوم الدخول"),
            Localized::new("24/7 concierge service", "خدمة كونسيرج على مدار الساعة"),
        ],
    }]
}

// =============================================================================
// Testimonials
// =============================================================================

pub fn testimonials() -> Vec<Testimonial> {
    let entry = |id: u32,
                 name: &str,
                 role: Localized,
                 text: Localized,
                 image_id: &str,
                 location: &str,
                 package: &str| Testimonial {
        id,
        name: name.to_string(),
        role,
        rating: 5,
        text,
        image: image(image_id),
        location: location.to_string(),
        package: package.to_string(),
        audio_url: format!("/audio/testimonial{id}.mp3"),
    };

    vec![
        entry(
            1,
            "Sarah Johnson",
            Localized::new("Travel Enthusiast", "محبة السفر"),
            Localized::new(
                "Absolutely incredible experience! The villa was stunning and the service was \
                 impeccable. Dubai Premier made our honeymoon unforgettable.",
                "تجربة رائعة بشكل مطلق! كانت الفيلا مذهلة والخدمة لا تشوبها شائبة. جعلت دبي \
                 بريمير شهر عسلنا لا ينسى.",
            ),
            "photo-1494790108755-2616b612b47c",
            "New York, USA",
            "Luxury Villa Package",
        ),
        entry(
            2,
            "Ahmed Al-Mansouri",
            Localized::new("Business Executive", "مدير تنفيذي"),
            Localized::new(
                "The car rental service exceeded all expectations. Driving a Lamborghini through \
                 Dubai was a dream come true. Professional and seamless service.",
                "خدمة تأجير السيارات فاقت كل التوقعات. قيادة لامبورغيني في دبي كانت حلم تحقق. \
                 خدمة مهنية وسلسة.",
            ),
            "photo-1507003211169-0a1dd7228f2d",
            "Dubai, UAE",
            "Luxury Car Experience",
        ),
        entry(
            3,
            "Emily Chen",
            Localized::new("Digital Nomad", "رحالة رقمية"),
            Localized::new(
                "The eSIM service kept me connected throughout my Middle East tour. Fast speeds, \
                 great coverage, and excellent customer support. Highly recommended!",
                "خدمة الشريحة الإلكترونية أبقتني متصلة طوال جولتي في الشرق الأوسط. سرعات عالية \
                 وتغطية ممتازة ودعم عملاء رائع. أنصح بها بشدة!",
            ),
            "photo-1438761681033-6461ffad8d80",
            "Singapore",
            "Travel eSIM Global",
        ),
        entry(
            4,
            "Marcus Rodriguez",
            Localized::new("Photographer", "مصور فوتوغرافي"),
            Localized::new(
                "Dubai Premier's nightlife packages are exceptional. VIP access to the best \
                 venues with amazing views. Perfect for special occasions and networking.",
                "حزم الحياة الليلية من دبي بريمير استثنائية. وصول كبار الشخصيات لأفضل الأماكن \
                 مع مناظر خلابة. مثالية للمناسبات الخاصة والتواصل.",
            ),
            "photo-1500648767791-00dcc994a43e",
            "Barcelona, Spain",
            "VIP Nightlife Experience",
        ),
    ]
}

// =============================================================================
// Map
// =============================================================================

pub fn locations() -> Vec<Location> {
    let pin = |id: u32,
               name: &str,
               description: Localized,
               kind: LocationKind,
               (x, y): (u8, u8),
               services: [&str; 3],
               image_id: &str| Location {
        id,
        name: name.to_string(),
        description,
        kind,
        x,
        y,
        services: services.iter().map(|s| s.to_string()).collect(),
        image: image(image_id),
    };

    vec![
        pin(
            1,
            "Burj Khalifa",
            Localized::new(
                "World's tallest building with luxury experiences",
                "أطول مبنى في العالم مع تجارب فاخرة",
            ),
            LocationKind::Hotel,
            (45, 60),
            ["Luxury Dining", "Observation Deck", "Hotel Suites"],
            "photo-1512453979798-5ea266f8880c",
        ),
        pin(
            2,
            "Dubai International Airport",
            Localized::new(
                "Premium flight services and lounges",
                "خدمات الطيران المميزة والصالات",
            ),
            LocationKind::Airport,
            (70, 40),
            ["Private Jets", "VIP Lounges", "Fast Track"],
            "photo-1436491865332-7a61a109cc05",
        ),
        pin(
            3,
            "Palm Jumeirah",
            Localized::new(
                "Exclusive island with luxury villas and resorts",
                "جزيرة حصرية مع فيلات ومنتجعات فاخرة",
            ),
            LocationKind::Hotel,
            (25, 45),
            ["Luxury Villas", "Beach Resorts", "Private Beaches"],
            "photo-1512917774080-9991f1c4c750",
        ),
        pin(
            4,
            "Dubai Marina",
            Localized::new(
                "Premium nightlife and yacht experiences",
                "الحياة الليلية المميزة وتجارب اليخوت",
            ),
            LocationKind::Nightlife,
            (15, 35),
            ["Rooftop Bars", "Yacht Charters", "Fine Dining"],
            "photo-1566737236500-c8ac43014a8e",
        ),
        pin(
            5,
            "Downtown Dubai",
            Localized::new(
                "Shopping and luxury car rentals",
                "التسوق وتأجير السيارات الفاخرة",
            ),
            LocationKind::CarRental,
            (50, 55),
            ["Luxury Cars", "Shopping Malls", "Premium Hotels"],
            "photo-1493238792000-8113da705763",
        ),
    ]
}

// =============================================================================
// Search Schema
// =============================================================================

fn cities() -> Vec<SelectOption> {
    [
        ("DXB", "Dubai", "دبي"),
        ("AUH", "Abu Dhabi", "أبوظبي"),
        ("SHJ", "Sharjah", "الشارقة"),
        ("LHR", "London", "لندن"),
        ("JFK", "New York", "نيويورك"),
        ("CDG", "Paris", "باريس"),
    ]
    .into_iter()
    .map(|(code, en, ar)| SelectOption::new(code, Localized::new(en, ar)))
    .collect()
}

/// Location + date, shared by the villas, nightlife and eSIM tabs.
fn location_and_date(tab: TabId, label: Localized) -> TabSchema {
    TabSchema {
        tab,
        label,
        fields: vec![
            FieldDescriptor::text("location", Localized::new("Location", "الموقع")),
            FieldDescriptor::date("date", Localized::new("Date", "التاريخ")),
        ],
    }
}

pub fn search_schema() -> FormSchema {
    FormSchema::new(vec![
        TabSchema {
            tab: TabId::Flights,
            label: Localized::new("Flights", "طيران"),
            fields: vec![
                FieldDescriptor::select("from", Localized::new("From", "من"), cities()),
                FieldDescriptor::select("to", Localized::new("To", "إلى"), cities()),
                FieldDescriptor::date("departure", Localized::new("Departure", "المغادرة")),
                FieldDescriptor::numeric_select(
                    "guests",
                    Localized::new("Guests", "الضيوف"),
                    i64::from(MIN_GUESTS),
                    i64::from(MAX_GUESTS),
                    i64::from(DEFAULT_FLIGHT_GUESTS),
                ),
            ],
        },
        TabSchema {
            tab: TabId::Cars,
            label: Localized::new("Cars", "سيارات"),
            fields: vec![
                FieldDescriptor::text(
                    "pickup",
                    Localized::new("Pick-up Location", "موقع الاستلام"),
                ),
                FieldDescriptor::date_range(
                    "rental",
                    Localized::new("Pick-up / Return Date", "تاريخ الاستلام / الإرجاع"),
                ),
            ],
        },
        location_and_date(TabId::Villas, Localized::new("Villas", "فيلات")),
        location_and_date(TabId::Nightlife, Localized::new("Nightlife", "الحياة الليلية")),
        location_and_date(TabId::Esim, Localized::new("eSIM", "شريحة إلكترونية")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_search_schema_is_valid() {
        let schema = search_schema();
        schema.validate().unwrap();
        let tabs: Vec<_> = schema.tabs.iter().map(|t| t.tab).collect();
        assert_eq!(tabs, TabId::ALL.to_vec());
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = services().iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), services().len());
        let ids: HashSet<_> = locations().iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), locations().len());
    }

    #[test]
    fn test_every_map_kind_has_a_bookable_service() {
        let services = services();
        for location in locations() {
            let category = crate::map::bookable_category(location.kind);
            assert!(
                services.iter().any(|s| s.category == category),
                "{} has nothing to book",
                location.name
            );
        }
    }

    #[test]
    fn test_pins_are_on_the_map() {
        for location in locations() {
            assert!(location.x <= 100 && location.y <= 100);
        }
    }
}
