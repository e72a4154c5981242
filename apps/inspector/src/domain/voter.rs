use serde::Serialize;

/// Card for the voter standing at the desk while a ballot is inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterProfile {
    pub name: &'static str,
    pub face: &'static str,
    pub district: &'static str,
    pub age: u8,
    pub voter_id: String,
}

struct PoolEntry {
    name: &'static str,
    face: &'static str,
    district: &'static str,
}

const fn entry(name: &'static str, face: &'static str, district: &'static str) -> PoolEntry {
    PoolEntry { name, face, district }
}

const VOTER_POOL: [PoolEntry; 20] = [
    entry("Ram Bahadur Thapa", "👨", "Kathmandu"),
    entry("Sita Kumari Sharma", "👩", "Lalitpur"),
    entry("Krishna Pd. Adhikari", "👴", "Bhaktapur"),
    entry("Laxmi Devi Gurung", "👵", "Kaski"),
    entry("Bimal Raj Shrestha", "🧑", "Chitwan"),
    entry("Sunita Rai", "👩", "Morang"),
    entry("Hari Bahadur Karki", "👨", "Sunsari"),
    entry("Manita Tamang", "👧", "Nuwakot"),
    entry("Ganesh Pd. Poudel", "👴", "Gorkha"),
    entry("Saraswati Devi Yadav", "👵", "Siraha"),
    entry("Nabin Khadka", "👦", "Rupandehi"),
    entry("Puja Magar", "👧", "Palpa"),
    entry("Rajendra Prasad Shah", "👨", "Bara"),
    entry("Kamala Kumari Tiwari", "👩", "Parsa"),
    entry("Dipak Bahadur Rana", "🧑", "Dang"),
    entry("Rekha Chaudhary", "👩", "Kailali"),
    entry("Bikram Singh Basnet", "👨", "Jumla"),
    entry("Gita Limbu", "👧", "Taplejung"),
    entry("Suman Ale Magar", "🧑", "Myagdi"),
    entry("Savita Pandey", "👩", "Dadeldhura"),
];

/// Profile for queue position `index`. Pure: the same index always yields the same voter.
pub fn voter_for(index: usize) -> VoterProfile {
    let base = &VOTER_POOL[index % VOTER_POOL.len()];
    let i = index as u64;
    let age = 18 + (i.wrapping_mul(7).wrapping_add(13) % 55) as u8;
    let number = i.wrapping_mul(3947).wrapping_add(1021) % 99_999;
    VoterProfile {
        name: base.name,
        face: base.face,
        district: base.district,
        age,
        voter_id: format!("NEC-{number:05}"),
    }
}
