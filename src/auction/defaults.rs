use super::model::{Listing, Section};

/// 기본 경매 목록 (서버 초기 데이터이자 화면의 기본 카드)
pub fn default_listings(section: Section) -> Vec<Listing> {
    match section {
        Section::Trending => vec![
            Listing::new("Basketball Rookie Card", "$2,750", "2025-08-01T20:00:00"),
            Listing::new("Sports Card Collection Lot", "$1,150", "2025-08-03T14:30:00"),
            Listing::new("Memorabilia Bundle", "$3,600", "2025-08-05T09:00:00"),
        ],
        Section::Featured => vec![
            Listing::new("Vintage Auctioneer Gavel", "$1,350", "2025-08-10T12:00:00"),
            Listing::new("Signed Basketball", "$2,900", "2025-08-12T17:30:00"),
            Listing::new(
                "Autographed Baseball Collection",
                "$3,250",
                "2025-08-14T15:45:00",
            ),
        ],
    }
}
