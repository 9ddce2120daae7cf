// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_put_back::CodePairPutBack;
use crate::{DxfError, DxfResult, Entity, EntityType, Registry};

use itertools::{put_back, PutBack};

/// Reads flat entities until `0/ENDSEC`, `0/ENDBLK`, or `0/EOF`.  The first read error ends the
/// iteration and is kept in `error`.
pub(crate) struct EntityIter<'a, 'b> {
    pub iter: &'a mut CodePairPutBack<'b>,
    pub registry: &'a mut Registry,
    pub error: Option<DxfError>,
}

impl<'a, 'b> Iterator for EntityIter<'a, 'b> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        if self.error.is_some() {
            return None;
        }
        match Entity::read(self.iter, self.registry) {
            Ok(Some(e)) => Some(e),
            Ok(None) => None,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl<'a, 'b> EntityIter<'a, 'b> {
    pub(crate) fn new(iter: &'a mut CodePairPutBack<'b>, registry: &'a mut Registry) -> Self {
        EntityIter {
            iter,
            registry,
            error: None,
        }
    }
    pub(crate) fn read_entities_into_vec(&mut self, entities: &mut Vec<Entity>) -> DxfResult<()> {
        collect_entities(self, entities);
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Folds VERTEX and SEQEND entities into their POLYLINE, and ATTRIB and SEQEND entities into
/// their INSERT.
pub(crate) fn collect_entities<I>(iter: &mut I, entities: &mut Vec<Entity>)
where
    I: Iterator<Item = Entity>,
{
    fn take_seqend<I>(iter: &mut PutBack<I>) -> Option<Box<Entity>>
    where
        I: Iterator<Item = Entity>,
    {
        match iter.next() {
            Some(
                ent @ Entity {
                    specific: EntityType::Seqend,
                    ..
                },
            ) => Some(Box::new(ent)),
            Some(ent) => {
                iter.put_back(ent);
                None
            }
            None => None,
        }
    }

    let mut iter = put_back(iter);
    loop {
        match iter.next() {
            Some(Entity {
                common,
                specific: EntityType::Insert(mut ins),
            }) if ins.attributes_follow => {
                loop {
                    match iter.next() {
                        Some(ent) if ent.type_string() == "ATTRIB" => ins.attributes.push(ent),
                        Some(ent) => {
                            // stop gathering on any non-ATTRIB
                            iter.put_back(ent);
                            break;
                        }
                        None => break,
                    }
                }

                ins.seqend = take_seqend(&mut iter);
                entities.push(Entity {
                    common,
                    specific: EntityType::Insert(ins),
                });
            }
            Some(Entity {
                common,
                specific: EntityType::Polyline(mut poly),
            }) => {
                loop {
                    match iter.next() {
                        Some(
                            ent @ Entity {
                                specific: EntityType::Vertex(_),
                                ..
                            },
                        ) => poly.vertices.push(ent),
                        Some(ent) => {
                            // stop gathering on any non-VERTEX
                            iter.put_back(ent);
                            break;
                        }
                        None => break,
                    }
                }

                poly.seqend = take_seqend(&mut iter);
                entities.push(Entity {
                    common,
                    specific: EntityType::Polyline(poly),
                });
            }
            Some(entity) => entities.push(entity),
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;
    use crate::Point;

    fn entity(specific: EntityType) -> Entity {
        Entity::new(specific)
    }

    #[test]
    fn vertices_and_seqend_fold_into_polyline() {
        let stream = vec![
            entity(EntityType::Polyline(Polyline::default())),
            entity(EntityType::Vertex(Vertex::new(Point::origin()))),
            entity(EntityType::Vertex(Vertex::new(Point::new(1.0, 0.0, 0.0)))),
            entity(EntityType::Seqend),
            entity(EntityType::Line(Line::default())),
        ];
        let mut entities = vec![];
        collect_entities(&mut stream.into_iter(), &mut entities);
        assert_eq!(2, entities.len());
        match entities[0].specific {
            EntityType::Polyline(ref poly) => {
                assert_eq!(2, poly.vertices.len());
                assert!(poly.seqend.is_some());
            }
            _ => panic!("expected a polyline"),
        }
        assert_eq!("LINE", entities[1].type_string());
    }

    #[test]
    fn attributes_fold_into_insert() {
        let mut ins = Insert::default();
        ins.attributes_follow = true;
        let stream = vec![
            entity(EntityType::Insert(ins)),
            entity(EntityType::Unknown(String::from("ATTRIB"))),
            entity(EntityType::Seqend),
            entity(EntityType::Seqend),
        ];
        let mut entities = vec![];
        collect_entities(&mut stream.into_iter(), &mut entities);
        assert_eq!(2, entities.len());
        match entities[0].specific {
            EntityType::Insert(ref ins) => {
                assert_eq!(1, ins.attributes.len());
                assert!(ins.seqend.is_some());
            }
            _ => panic!("expected an insert"),
        }
        // a stray SEQEND is kept as-is
        assert_eq!("SEQEND", entities[1].type_string());
    }

    #[test]
    fn insert_without_attributes_keeps_following_entities() {
        let stream = vec![
            entity(EntityType::Insert(Insert::default())),
            entity(EntityType::Unknown(String::from("ATTRIB"))),
        ];
        let mut entities = vec![];
        collect_entities(&mut stream.into_iter(), &mut entities);
        assert_eq!(2, entities.len());
    }
}
