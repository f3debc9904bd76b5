mod kind;
mod value;
