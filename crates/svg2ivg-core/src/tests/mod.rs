mod markup;
mod transform;
