use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of fresh record identifiers.
///
/// Implementations make no uniqueness promise: two calls may return the same
/// identifier, and nothing checks whether it is already in use.
pub trait IdGenerator: Send + Sync + 'static {
    fn next(&self) -> String;
}

const ADJECTIVES: [&str; 64] = [
    "agile", "amber", "ancient", "bold", "brave", "breezy", "bright", "calm", "cheerful",
    "clever", "cosmic", "crimson", "curious", "daring", "dizzy", "eager", "electric", "fancy",
    "fearless", "fluffy", "frosty", "gentle", "giddy", "golden", "grumpy", "happy", "hidden",
    "humble", "icy", "jolly", "keen", "lively", "lucky", "mellow", "mighty", "misty", "nimble",
    "noble", "odd", "plucky", "polite", "proud", "quick", "quiet", "rapid", "rusty", "shiny",
    "silent", "silly", "sleepy", "sneaky", "spicy", "steady", "stormy", "sunny", "swift",
    "tidy", "tiny", "velvet", "wandering", "wise", "witty", "wobbly", "zany",
];

const ANIMALS: [&str; 75] = [
    "albatross", "alpaca", "badger", "bat", "beaver", "bison", "buffalo", "camel", "cheetah",
    "cobra", "coyote", "crane", "crow", "deer", "dingo", "dolphin", "eagle", "falcon", "ferret",
    "finch", "fox", "gazelle", "gecko", "gibbon", "giraffe", "goose", "hare", "hedgehog",
    "heron", "ibis", "iguana", "jackal", "jaguar", "koala", "lemur", "leopard", "llama", "lynx",
    "magpie", "marmot", "meerkat", "mole", "moose", "narwhal", "newt", "ocelot", "octopus",
    "otter", "owl", "panda", "panther", "parrot", "pelican", "penguin", "puffin", "quail",
    "rabbit", "raccoon", "raven", "salmon", "seal", "sloth", "sparrow", "squid", "stork",
    "tapir", "tiger", "toucan", "turtle", "viper", "walrus", "weasel", "wombat", "yak", "zebra",
];

/// Generates `adjective-animal` nicknames such as `brave-otter`.
pub struct NicknameGenerator {
    rng: Mutex<StdRng>,
}

impl NicknameGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Generator with a fixed seed, producing a reproducible sequence
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for NicknameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for NicknameGenerator {
    fn next(&self) -> String {
        let mut rng = self.rng.lock();
        let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
        let animal = ANIMALS[rng.gen_range(0..ANIMALS.len())];
        format!("{}-{}", adjective, animal)
    }
}
