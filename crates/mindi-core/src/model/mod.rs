pub mod capture;
pub mod card;
pub mod deck;
pub mod hand;
pub mod rank;
pub mod seat;
pub mod suit;
pub mod table;
pub mod trick;
pub mod trump;
