use std::collections::HashSet;

use dataseed_core::WorkItem;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::GenerationError;

const EMAIL_DOMAINS: [&str; 3] = ["gmail.com", "yahoo.com", "hotmail.com"];
const PASSWORD_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%";

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emily", "James", "Jessica", "Robert", "Ashley",
    "William", "Amanda", "Richard", "Melissa", "Joseph", "Nicole", "Thomas", "Michelle",
    "Charles", "Kimberly", "Christopher", "Amy", "Daniel", "Angela", "Matthew", "Brenda",
    "Anthony", "Emma", "Mark", "Olivia", "Donald", "Cynthia", "Steven", "Marie", "Paul", "Janet",
    "Andrew", "Catherine", "Joshua", "Frances", "Kenneth", "Christine", "Kevin", "Samantha",
    "Brian", "Deborah", "George", "Rachel", "Timothy", "Carolyn", "Ronald", "Jason", "Virginia",
    "Edward", "Maria", "Jeffrey", "Heather", "Ryan", "Diane", "Jacob", "Julie", "Gary", "Joyce",
    "Nicholas", "Victoria", "Eric", "Kelly", "Jonathan", "Christina", "Stephen", "Joan", "Larry",
    "Evelyn", "Justin", "Judith", "Scott", "Megan", "Brandon", "Andrea", "Samuel", "Hannah",
    "Gregory", "Jacqueline", "Frank", "Martha", "Raymond", "Gloria", "Alexander", "Teresa",
    "Patrick", "Sara", "Jack", "Janice", "Dennis", "Jerry", "Julia", "Tyler", "Grace", "Aaron",
    "Judy",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Sanchez", "Clark", "Ramirez",
    "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright", "Scott", "Torres",
    "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell",
    "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans", "Turner", "Diaz", "Parker",
    "Cruz", "Edwards", "Collins", "Reyes", "Stewart", "Morris", "Morales", "Murphy", "Cook",
    "Rogers", "Gutierrez", "Ortiz", "Morgan", "Cooper", "Peterson", "Bailey", "Reed", "Kelly",
    "Howard", "Ramos", "Kim", "Cox", "Ward", "Richardson", "Watson", "Brooks", "Chavez", "Wood",
    "James", "Bennett", "Gray", "Mendoza", "Ruiz", "Hughes", "Price", "Alvarez", "Castillo",
    "Sanders",
];

/// How usernames are derived from the drawn first and last name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserStrategy {
    /// Variation picked by `index % 7`; large indices are folded into the
    /// email. Cheap, but two rows may share a username.
    #[default]
    Indexed,
    /// First variation not yet taken, then index-suffixed forms. Usernames
    /// never repeat within one generated set.
    Unique,
}

/// Options for [`generate_users`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserOptions {
    pub seed: u64,
    pub count: usize,
    pub strategy: UserStrategy,
}

impl Default for UserOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 5_000,
            strategy: UserStrategy::Indexed,
        }
    }
}

/// A registration row. Field names match the member service's request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub user_mail: String,
    pub user_phone_number: String,
    pub password: String,
}

impl UserRecord {
    /// Stable key for the batch processor.
    ///
    /// Neither the username nor the email is unique on its own under
    /// [`UserStrategy::Indexed`], so the key combines both.
    pub fn key(&self) -> String {
        format!("{} <{}>", self.username, self.user_mail)
    }

    pub fn to_work_item(&self) -> WorkItem {
        WorkItem::new(
            self.key(),
            json!({
                "username": self.username,
                "userMail": self.user_mail,
                "userPhoneNumber": self.user_phone_number,
                "password": self.password,
            }),
        )
    }
}

/// Generate `count` users with 1-based indices.
pub fn generate_users(options: &UserOptions) -> Result<Vec<UserRecord>, GenerationError> {
    if options.count == 0 {
        return Err(GenerationError::InvalidOptions(
            "count must be at least 1".to_string(),
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut taken = HashSet::new();
    let mut users = Vec::with_capacity(options.count);

    for index in 1..=options.count {
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("user");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("seed");
        let domain = EMAIL_DOMAINS[index % EMAIL_DOMAINS.len()];

        let (username, user_mail, phone_base) = match options.strategy {
            UserStrategy::Indexed => {
                let username = indexed_username(first, last, index);
                let user_mail = if index < 1000 {
                    format!("{username}@{domain}")
                } else {
                    format!("{username}{index}@{domain}")
                };
                (username, user_mail, 1_000_000_000)
            }
            UserStrategy::Unique => {
                let username = unique_username(first, last, index, &mut taken);
                let user_mail = format!("{username}@{domain}");
                (username, user_mail, 2_000_000_000)
            }
        };

        users.push(UserRecord {
            username,
            user_mail,
            user_phone_number: (phone_base + index as u64).to_string(),
            password: password(&mut rng),
        });
    }

    Ok(users)
}

fn indexed_username(first: &str, last: &str, index: usize) -> String {
    let first = first.to_lowercase();
    let last = last.to_lowercase();
    let f = initial(&first);
    let l = initial(&last);
    match index % 7 {
        0 => format!("{first}{last}"),
        1 => format!("{first}.{last}"),
        2 => format!("{first}_{last}"),
        3 => format!("{first}{last}{index}"),
        4 => format!("{first}.{last}{index}"),
        5 => format!("{f}{last}{index}"),
        _ => format!("{first}{l}{index}"),
    }
}

fn unique_username(first: &str, last: &str, index: usize, taken: &mut HashSet<String>) -> String {
    let first = first.to_lowercase();
    let last = last.to_lowercase();
    let variations = [
        format!("{first}{last}"),
        format!("{first}.{last}"),
        format!("{first}_{last}"),
        format!("{}{last}", initial(&first)),
        format!("{first}{}", initial(&last)),
    ];

    for variation in &variations {
        if taken.insert(variation.clone()) {
            return variation.clone();
        }
        for digits in 1..=5_u32 {
            let candidate = format!("{variation}{}", index % 10_usize.pow(digits));
            if taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    let base = format!("{first}{last}{index}");
    if taken.insert(base.clone()) {
        return base;
    }
    let mut counter = 1_usize;
    loop {
        let candidate = format!("{base}_{counter}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

fn password(rng: &mut ChaCha8Rng) -> String {
    let len = rng.random_range(8..=12);
    (0..len)
        .map(|_| char::from(PASSWORD_CHARS[rng.random_range(0..PASSWORD_CHARS.len())]))
        .collect()
}
