mod container;
mod option;
