//! Built-in sample data so every app is usable without a catalog file.

use crate::domain::{Artist, Category, Drink, Ingredient, QuizQuestion, Show, Venue};

pub fn seed_venues() -> Vec<Venue> {
  vec![
    Venue {
      id: 1,
      name: "The Musical Hop".into(),
      city: "San Francisco".into(),
      state: "CA".into(),
      address: "1015 Folsom Street".into(),
      phone: Some("123-123-1234".into()),
      genres: vec!["Jazz".into(), "Reggae".into(), "Swing".into(), "Classical".into(), "Folk".into()],
      image_link: Some("https://images.unsplash.com/photo-1543900694-133f37abaaa5".into()),
      facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
      website: Some("https://www.themusicalhop.com".into()),
      seeking_talent: true,
      seeking_description: Some("We are on the lookout for a local artist to play every two weeks. Please call us.".into()),
    },
    Venue {
      id: 2,
      name: "The Dueling Pianos Bar".into(),
      city: "New York".into(),
      state: "NY".into(),
      address: "335 Delancey Street".into(),
      phone: Some("914-003-1132".into()),
      genres: vec!["Classical".into(), "R&B".into(), "Hip-Hop".into()],
      image_link: Some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae".into()),
      facebook_link: Some("https://www.facebook.com/theduelingpianos".into()),
      website: Some("https://www.theduelingpianos.com".into()),
      seeking_talent: false,
      seeking_description: None,
    },
    Venue {
      id: 3,
      name: "Park Square Live Music & Coffee".into(),
      city: "San Francisco".into(),
      state: "CA".into(),
      address: "34 Whiskey Moore Ave".into(),
      phone: Some("415-000-1234".into()),
      genres: vec!["Rock n Roll".into(), "Jazz".into(), "Classical".into(), "Folk".into()],
      image_link: Some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7".into()),
      facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into()),
      website: Some("https://www.parksquarelivemusicandcoffee.com".into()),
      seeking_talent: false,
      seeking_description: None,
    },
  ]
}

pub fn seed_artists() -> Vec<Artist> {
  vec![
    Artist {
      id: 4,
      name: "Guns N Petals".into(),
      city: "San Francisco".into(),
      state: "CA".into(),
      phone: Some("326-123-5000".into()),
      genres: vec!["Rock n Roll".into()],
      image_link: Some("https://images.unsplash.com/photo-1549213783-8284d0336c4f".into()),
      facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
      website: Some("https://www.gunsnpetalsband.com".into()),
      seeking_venue: true,
      seeking_description: Some("Looking for shows to perform at in the San Francisco Bay Area!".into()),
    },
    Artist {
      id: 5,
      name: "Matt Quevedo".into(),
      city: "New York".into(),
      state: "NY".into(),
      phone: Some("300-400-5000".into()),
      genres: vec!["Jazz".into()],
      image_link: Some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5".into()),
      facebook_link: Some("https://www.facebook.com/mattquevedo923251523".into()),
      website: None,
      seeking_venue: false,
      seeking_description: None,
    },
    Artist {
      id: 6,
      name: "The Wild Sax Band".into(),
      city: "San Francisco".into(),
      state: "CA".into(),
      phone: Some("432-325-5432".into()),
      genres: vec!["Jazz".into(), "Classical".into()],
      image_link: Some("https://images.unsplash.com/photo-1558369981-f9ca78462e61".into()),
      facebook_link: None,
      website: None,
      seeking_venue: false,
      seeking_description: None,
    },
  ]
}

pub fn seed_shows() -> Vec<Show> {
  let show = |id, venue_id, artist_id, start: &str| Show { id, venue_id, artist_id, start_time: start.into() };
  vec![
    show(1, 1, 4, "2019-05-21T21:30:00.000Z"),
    show(2, 3, 5, "2019-06-15T23:00:00.000Z"),
    show(3, 3, 6, "2035-04-01T20:00:00.000Z"),
    show(4, 3, 6, "2035-04-08T20:00:00.000Z"),
    show(5, 3, 6, "2035-04-15T20:00:00.000Z"),
  ]
}

pub fn seed_categories() -> Vec<Category> {
  ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
    .iter()
    .zip(1..)
    .map(|(kind, id)| Category { id, kind: (*kind).into() })
    .collect()
}

pub fn seed_questions() -> Vec<QuizQuestion> {
  let q = |id, text: &str, answer: &str, category, difficulty| QuizQuestion {
    id,
    text: text.into(),
    answer: answer.into(),
    category,
    difficulty,
  };
  vec![
    q(2, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
    q(4, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
    q(5, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    q(9, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    q(10, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    q(11, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    q(13, "What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    q(14, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    q(16, "Which Dutch graphic artist–initials M C was a creator of optical illusions?", "Escher", 2, 1),
    q(17, "La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    q(20, "What is the heaviest organ in the human body?", "The Liver", 1, 4),
    q(21, "Who discovered penicillin?", "Alexander Fleming", 1, 3),
    q(22, "Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
  ]
}

pub fn seed_drinks() -> Vec<Drink> {
  vec![Drink {
    id: 1,
    title: "water".into(),
    recipe: vec![Ingredient { name: "water".into(), color: "blue".into(), parts: 1 }],
  }]
}
