//! Seed fixture shared by the integration tests.
//!
//! Shape worth knowing when writing assertions:
//! - topics `mitch`, `cats` and `paper`; `paper` has no articles
//! - 13 articles, all `mitch` except article 5 (`cats`)
//! - article 1 has 100 votes and 11 comments, article 2 has none
//! - articles 12 and 13 share a `created_at`
//! - comment 1 is on article 9, by `butter_bridge`, with 16 votes
//! - user `lurker` has written nothing

use chrono::{DateTime, Utc};

use gazette_kernel::models::{Article, Comment, DEFAULT_ARTICLE_IMG_URL, Topic, User};

/// Rows to load into a store.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,

    /// `comment_count` is ignored; stores derive it from `comments`.
    pub articles: Vec<Article>,
    pub comments: Vec<Comment>,
}

fn at(unix_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_secs, 0).unwrap_or_default()
}

fn topic(slug: &str, description: &str) -> Topic {
    Topic {
        slug: slug.to_string(),
        description: Some(description.to_string()),
    }
}

fn user(username: &str, name: &str, avatar_url: &str) -> User {
    User {
        username: username.to_string(),
        name: name.to_string(),
        avatar_url: avatar_url.to_string(),
    }
}

fn article(
    article_id: i32,
    title: &str,
    topic: &str,
    author: &str,
    body: &str,
    created_at: i64,
    votes: i32,
) -> Article {
    Article {
        article_id,
        author: author.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        topic: topic.to_string(),
        created_at: at(created_at),
        votes,
        article_img_url: DEFAULT_ARTICLE_IMG_URL.to_string(),
        comment_count: 0,
    }
}

fn comment(
    comment_id: i32,
    body: &str,
    article_id: i32,
    author: &str,
    votes: i32,
    created_at: i64,
) -> Comment {
    Comment {
        comment_id,
        body: body.to_string(),
        article_id,
        author: author.to_string(),
        votes,
        created_at: at(created_at),
    }
}

/// The standard fixture.
pub fn seed() -> SeedData {
    SeedData {
        topics: vec![
            topic("mitch", "The man, the Mitch, the legend"),
            topic("cats", "Not dogs"),
            topic("paper", "what books are made of"),
        ],
        users: vec![
            user(
                "butter_bridge",
                "jonny",
                "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg",
            ),
            user(
                "icellusedkars",
                "sam",
                "https://avatars2.githubusercontent.com/u/24604688?s=460&v=4",
            ),
            user(
                "rogersop",
                "paul",
                "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4",
            ),
            user(
                "lurker",
                "do_nothing",
                "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png",
            ),
        ],
        articles: vec![
            article(1, "Living in the shadow of a great man", "mitch", "butter_bridge",
                "I find this existence challenging", 1_594_329_060, 100),
            article(2, "Sony Vaio; or, The Laptop", "mitch", "icellusedkars",
                "Call me Mitchell. Some years ago I decided to buy a laptop.", 1_602_828_180, 0),
            article(3, "Eight pug gifs that remind me of mitch", "mitch", "icellusedkars",
                "some gifs", 1_604_394_720, 0),
            article(4, "Student SUES Mitch!", "mitch", "rogersop",
                "We all love Mitch and his wonderful, unique typing style.", 1_588_731_240, 0),
            article(5, "UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop",
                "Bastet walks amongst us, and the cats are taking arms!", 1_596_464_040, 0),
            article(6, "A", "mitch", "icellusedkars",
                "Delicious tin of cat food", 1_602_986_400, 0),
            article(7, "Z", "mitch", "icellusedkars", "I was hungry.", 1_578_406_080, 0),
            article(8, "Does Mitch predate civilisation?", "mitch", "icellusedkars",
                "Archaeologists have uncovered a gigantic statue from the dawn of humanity.",
                1_587_089_280, 0),
            article(9, "They're not exactly dogs, are they?", "mitch", "butter_bridge",
                "Well? Think about it.", 1_591_438_200, 0),
            article(10, "Seven inspirational thought leaders from Manchester UK", "mitch",
                "rogersop", "Who are we kidding, there is only one, and it's Mitch!",
                1_589_433_300, 0),
            article(11, "Am I a cat?", "mitch", "icellusedkars",
                "Having run out of ideas for articles, I am staring at the wall.",
                1_579_126_860, 0),
            article(12, "Moustache", "mitch", "butter_bridge",
                "Have you seen the size of that thing?", 1_602_419_040, 0),
            article(13, "Another article about Mitch", "mitch", "butter_bridge",
                "There will never be enough articles about Mitch!", 1_602_419_040, 0),
        ],
        comments: vec![
            comment(1, "Oh, I've got compassion running out of my nose, pal!", 9,
                "butter_bridge", 16, 1_586_179_020),
            comment(2, "The beautiful thing about treasure is that it exists.", 1,
                "butter_bridge", 14, 1_604_113_380),
            comment(3, "Onyx is the new black.", 1, "icellusedkars", 100, 1_583_025_180),
            comment(4, "I carry a log. Is it funny to you? It is not to me.", 1,
                "icellusedkars", -100, 1_582_459_260),
            comment(5, "I hate streaming noses", 1, "icellusedkars", 0, 1_604_437_200),
            comment(6, "I hate streaming eyes even more", 1, "icellusedkars", 0, 1_586_642_520),
            comment(7, "Lobster pot", 1, "icellusedkars", 0, 1_589_577_540),
            comment(8, "Delicious crackerbreads", 1, "icellusedkars", 0, 1_586_899_140),
            comment(9, "Superficially charming", 1, "icellusedkars", 0, 1_577_848_080),
            comment(10, "git push origin master", 3, "icellusedkars", 0, 1_592_641_440),
            comment(11, "Ambidextrous marsupial", 3, "icellusedkars", 0, 1_600_560_600),
            comment(12, "Massive intercranial brain haemorrhage", 1, "icellusedkars", 0,
                1_583_133_000),
            comment(13, "Fruit pastilles", 1, "icellusedkars", 0, 1_592_220_300),
            comment(14, "What do you see? I have no idea where this will lead us.", 5,
                "icellusedkars", 16, 1_591_682_400),
            comment(15, "I am 100% sure that we're not completely sure.", 5, "butter_bridge",
                1, 1_606_176_480),
            comment(16, "This is a bad article name", 6, "butter_bridge", 1, 1_602_433_380),
            comment(17, "The owls are not what they seem.", 9, "icellusedkars", 20,
                1_584_205_320),
            comment(18, "This morning, I showered for nine minutes.", 1, "butter_bridge", 16,
                1_595_294_400),
        ],
    }
}
