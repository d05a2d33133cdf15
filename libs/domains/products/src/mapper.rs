//! Conversions between the stored entity and its wire shape.

use crate::models::{Product, ProductDto};

pub fn entity_to_dto(product: Product) -> ProductDto {
    ProductDto {
        id: product.id,
        name: product.name,
        quantity: product.quantity,
        price: product.price,
    }
}

pub fn dto_to_entity(dto: ProductDto) -> Product {
    Product {
        id: dto.id,
        name: dto.name,
        quantity: dto.quantity,
        price: dto.price,
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        entity_to_dto(product)
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        dto_to_entity(dto)
    }
}
