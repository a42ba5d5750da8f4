pub mod lost_item;
